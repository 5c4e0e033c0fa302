//! Document export port - format conversion for generated PRDs.
//!
//! The stored PRD is markdown; admins export it for sharing. Conversion is
//! an external concern: the core hands over markdown and receives the
//! converted document.

use async_trait::async_trait;
use thiserror::Error;

/// Port for converting a stored PRD into a shareable format.
#[async_trait]
pub trait DocumentExport: Send + Sync {
    /// Converts markdown to a standalone HTML document.
    async fn to_html(&self, markdown: &str) -> Result<String, ExportError>;
}

/// Document export errors.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Nothing to export.
    #[error("no document available to export")]
    EmptyDocument,

    /// Conversion failed.
    #[error("conversion failed: {0}")]
    ConversionFailed(String),
}

impl ExportError {
    /// Creates a conversion failure.
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::ConversionFailed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_export_is_object_safe() {
        fn _accepts_dyn(_export: &dyn DocumentExport) {}
    }

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            ExportError::EmptyDocument.to_string(),
            "no document available to export"
        );
        assert_eq!(
            ExportError::conversion("bad markdown").to_string(),
            "conversion failed: bad markdown"
        );
    }
}
