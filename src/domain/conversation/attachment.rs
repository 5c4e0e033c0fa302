//! Attachment value object - metadata for an externally stored file.
//!
//! The domain only ever sees attachment metadata; file bytes live in the
//! file-storage collaborator and are retrieved through a time-limited URL.

use crate::domain::foundation::{DomainError, ValidationError};
use serde::{Deserialize, Serialize};

/// Reference to a file stored by the file-storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Time-limited signed retrieval URL.
    url: String,

    /// Display name (original file name).
    name: String,

    /// MIME type reported at upload.
    mime_type: String,
}

impl Attachment {
    /// Creates a new attachment reference.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if url, name, or mime type is empty
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let url = url.into();
        let name = name.into();
        let mime_type = mime_type.into();

        if url.trim().is_empty() {
            return Err(ValidationError::empty_field("url").into());
        }
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if mime_type.trim().is_empty() {
            return Err(ValidationError::empty_field("mime_type").into());
        }

        Ok(Self {
            url,
            name,
            mime_type,
        })
    }

    /// Returns the retrieval URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Renders the annotation line folded into the text sent to the AI
    /// collaborator. The assistant only ever sees this metadata, never bytes.
    pub fn annotation(&self) -> String {
        format!("[Vedhæftet fil: {} ({})]", self.name, self.mime_type)
    }
}
