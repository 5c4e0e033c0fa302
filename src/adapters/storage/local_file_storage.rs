//! Local filesystem implementation of FileStorage.
//!
//! Stores attachment bytes under a content root and mints time-limited
//! retrieval URLs served by the fronting file endpoint. Constraint checks
//! run before anything touches the disk.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use uuid::Uuid;

use crate::domain::conversation::Attachment;
use crate::domain::foundation::Timestamp;
use crate::ports::{FileStorage, FileUpload, StorageError};

/// Default lifetime of a retrieval URL: 24 hours.
pub const DEFAULT_URL_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// File storage rooted in a local directory.
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: String,
    url_ttl: Duration,
}

impl LocalFileStorage {
    /// Creates a new storage adapter.
    ///
    /// `root` is the directory files are written into; `public_base_url`
    /// is the prefix of the serving endpoint (no trailing slash).
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
            url_ttl: DEFAULT_URL_TTL,
        }
    }

    /// Overrides the retrieval URL lifetime.
    pub fn with_url_ttl(mut self, ttl: Duration) -> Self {
        self.url_ttl = ttl;
        self
    }

    /// Token-based object name: random, preserving the original extension.
    fn object_name(original: &str) -> String {
        let token = Uuid::new_v4();
        match original.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => format!("{}.{}", token, ext),
            _ => token.to_string(),
        }
    }

    fn signed_url(&self, object: &str) -> String {
        let expires = Timestamp::now().plus_secs(self.url_ttl.as_secs());
        format!(
            "{}/{}?expires={}",
            self.public_base_url,
            object,
            expires.as_datetime().timestamp()
        )
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, upload: FileUpload) -> Result<Attachment, StorageError> {
        upload.validate()?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::io(format!("Failed to create storage root: {}", e)))?;

        let object = Self::object_name(&upload.name);
        let path = self.root.join(&object);
        fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| StorageError::io(format!("Failed to write file: {}", e)))?;

        Attachment::new(self.signed_url(&object), upload.name, upload.mime_type)
            .map_err(|e| StorageError::io(format!("Invalid attachment metadata: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MAX_FILE_SIZE_BYTES;
    use tempfile::tempdir;

    fn storage(dir: &tempfile::TempDir) -> LocalFileStorage {
        LocalFileStorage::new(dir.path(), "https://files.example.com/chat-attachments")
    }

    #[tokio::test]
    async fn stores_file_and_returns_signed_url() {
        let dir = tempdir().unwrap();
        let upload = FileUpload::new("skitse.png", "image/png", vec![1, 2, 3]);

        let attachment = storage(&dir).store(upload).await.unwrap();

        assert_eq!(attachment.name(), "skitse.png");
        assert_eq!(attachment.mime_type(), "image/png");
        assert!(attachment
            .url()
            .starts_with("https://files.example.com/chat-attachments/"));
        assert!(attachment.url().contains("?expires="));

        // Exactly one object landed in the root, with the extension kept.
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let entry = entries.next_entry().await.unwrap().unwrap();
        assert!(entry.file_name().to_string_lossy().ends_with(".png"));
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn oversize_upload_is_rejected_before_writing() {
        let dir = tempdir().unwrap();
        let upload = FileUpload::new(
            "kæmpe.pdf",
            "application/pdf",
            vec![0u8; MAX_FILE_SIZE_BYTES + 1],
        );

        let err = storage(&dir).store(upload).await.unwrap_err();

        assert!(matches!(err, StorageError::FileTooLarge { .. }));
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn disallowed_type_is_rejected_before_writing() {
        let dir = tempdir().unwrap();
        let upload = FileUpload::new("script.sh", "text/x-shellscript", vec![0u8; 10]);

        let err = storage(&dir).store(upload).await.unwrap_err();

        assert!(matches!(err, StorageError::UnsupportedFileType { .. }));
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[test]
    fn object_names_are_unique_and_keep_extension() {
        let a = LocalFileStorage::object_name("rapport.docx");
        let b = LocalFileStorage::object_name("rapport.docx");
        assert_ne!(a, b);
        assert!(a.ends_with(".docx"));
    }

    #[test]
    fn object_name_without_extension_is_bare_token() {
        let name = LocalFileStorage::object_name("README");
        assert!(!name.contains('.'));
    }
}
