//! ExportPrdHandler - converts a stored PRD for sharing.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SuggestionId, UserId};
use crate::ports::{AccessChecker, DocumentExport, ExportError, SuggestionRepository};

/// Command to export a suggestion's PRD.
#[derive(Debug, Clone)]
pub struct ExportPrdCommand {
    pub suggestion_id: SuggestionId,
    pub requested_by: UserId,
}

/// Result of exporting a PRD.
#[derive(Debug, Clone)]
pub struct ExportPrdResult {
    /// The converted HTML document.
    pub html: String,
}

/// Errors that can occur when exporting a PRD.
#[derive(Debug, Clone, Error)]
pub enum ExportPrdError {
    /// Suggestion was not found.
    #[error("Suggestion not found: {0}")]
    NotFound(SuggestionId),

    /// Caller is not an admin.
    #[error("Forbidden: admin role required")]
    Forbidden,

    /// The suggestion has no PRD to export.
    #[error("Suggestion has no PRD")]
    NoPrd,

    /// Conversion failed.
    #[error("Export error: {0}")]
    Export(String),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for ExportPrdError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ExportPrdError::Forbidden,
            ErrorCode::DatabaseError => ExportPrdError::Repository(err.message),
            _ => ExportPrdError::Domain(err.to_string()),
        }
    }
}

impl From<ExportError> for ExportPrdError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::EmptyDocument => ExportPrdError::NoPrd,
            ExportError::ConversionFailed(msg) => ExportPrdError::Export(msg),
        }
    }
}

/// Handler for ExportPrd commands.
pub struct ExportPrdHandler {
    repository: Arc<dyn SuggestionRepository>,
    access: Arc<dyn AccessChecker>,
    export: Arc<dyn DocumentExport>,
}

impl ExportPrdHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        repository: Arc<dyn SuggestionRepository>,
        access: Arc<dyn AccessChecker>,
        export: Arc<dyn DocumentExport>,
    ) -> Self {
        Self {
            repository,
            access,
            export,
        }
    }

    /// Converts the stored PRD to HTML.
    pub async fn handle(&self, cmd: ExportPrdCommand) -> Result<ExportPrdResult, ExportPrdError> {
        self.access.ensure_admin(&cmd.requested_by).await?;

        let suggestion = self
            .repository
            .find_by_id(&cmd.suggestion_id)
            .await?
            .ok_or(ExportPrdError::NotFound(cmd.suggestion_id))?;

        let markdown = suggestion.prd().ok_or(ExportPrdError::NoPrd)?;
        let html = self.export.to_html(markdown).await?;

        Ok(ExportPrdResult { html })
    }
}
