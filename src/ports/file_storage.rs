//! File storage port - attachment upload behind size/type constraints.
//!
//! The engine never inspects file bytes; it stores them through this port
//! and keeps only the returned metadata (time-limited URL, name, type).
//! Constraint violations are reported before any upload attempt.

use crate::domain::conversation::Attachment;
use async_trait::async_trait;
use thiserror::Error;

/// Maximum accepted upload size: 10 MB.
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for chat attachments: images, PDF, plain text,
/// Word, and Excel.
pub const ALLOWED_MIME_TYPES: [&str; 10] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// An upload about to be handed to the storage collaborator.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name.
    pub name: String,
    /// MIME type reported by the client.
    pub mime_type: String,
    /// File content.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates a new upload.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Validates size and MIME constraints. Called before any storage I/O.
    ///
    /// # Errors
    ///
    /// - `FileTooLarge` above [`MAX_FILE_SIZE_BYTES`]
    /// - `UnsupportedFileType` for MIME types outside the allow-list
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.bytes.len() > MAX_FILE_SIZE_BYTES {
            return Err(StorageError::FileTooLarge {
                size: self.bytes.len(),
                max: MAX_FILE_SIZE_BYTES,
            });
        }
        if !ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(StorageError::UnsupportedFileType {
                mime_type: self.mime_type.clone(),
            });
        }
        Ok(())
    }
}

/// Port for the external file-storage collaborator.
///
/// Implementations must call [`FileUpload::validate`] before writing
/// anything, and return a time-limited signed retrieval URL.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores the file and returns the attachment metadata the domain keeps.
    async fn store(&self, upload: FileUpload) -> Result<Attachment, StorageError>;
}

/// File storage errors.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Upload exceeds the size cap.
    #[error("file too large: {size} bytes exceeds {max} byte limit")]
    FileTooLarge {
        /// Actual size.
        size: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// MIME type outside the allow-list.
    #[error("unsupported file type: {mime_type}")]
    UnsupportedFileType {
        /// The rejected MIME type.
        mime_type: String,
    },

    /// Underlying storage I/O failed.
    #[error("storage I/O error: {0}")]
    Io(String),
}

impl StorageError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Returns true for constraint rejections (no upload was attempted).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            StorageError::FileTooLarge { .. } | StorageError::UnsupportedFileType { .. }
        )
    }
}
