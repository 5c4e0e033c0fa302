//! ArchiveSuggestionHandler - soft-deletes a decided suggestion.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, SuggestionId, UserId};
use crate::domain::suggestion::Suggestion;
use crate::ports::{AccessChecker, SuggestionRepository};

/// Command to archive a suggestion.
#[derive(Debug, Clone)]
pub struct ArchiveSuggestionCommand {
    pub suggestion_id: SuggestionId,
    pub archived_by: UserId,
}

/// Result of archiving.
#[derive(Debug, Clone)]
pub struct ArchiveSuggestionResult {
    pub suggestion: Suggestion,
}

/// Errors that can occur when archiving a suggestion.
#[derive(Debug, Clone, Error)]
pub enum ArchiveSuggestionError {
    /// Suggestion was not found.
    #[error("Suggestion not found: {0}")]
    NotFound(SuggestionId),

    /// Caller is not an admin.
    #[error("Forbidden: admin role required")]
    Forbidden,

    /// Already archived; archival is one-way.
    #[error("Suggestion is already archived")]
    AlreadyArchived,

    /// A pending suggestion cannot be archived.
    #[error("Pending suggestions cannot be archived")]
    StillPending,

    /// Repository error during persistence.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for ArchiveSuggestionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ArchiveSuggestionError::Forbidden,
            ErrorCode::SuggestionArchived => ArchiveSuggestionError::AlreadyArchived,
            ErrorCode::InvalidStateTransition => ArchiveSuggestionError::StillPending,
            ErrorCode::DatabaseError => ArchiveSuggestionError::Repository(err.message),
            _ => ArchiveSuggestionError::Domain(err.to_string()),
        }
    }
}

/// Handler for ArchiveSuggestion commands.
pub struct ArchiveSuggestionHandler {
    repository: Arc<dyn SuggestionRepository>,
    access: Arc<dyn AccessChecker>,
}

impl ArchiveSuggestionHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(repository: Arc<dyn SuggestionRepository>, access: Arc<dyn AccessChecker>) -> Self {
        Self { repository, access }
    }

    /// Archives the suggestion, keeping its status.
    pub async fn handle(
        &self,
        cmd: ArchiveSuggestionCommand,
    ) -> Result<ArchiveSuggestionResult, ArchiveSuggestionError> {
        self.access.ensure_admin(&cmd.archived_by).await?;

        let mut suggestion = self
            .repository
            .find_by_id(&cmd.suggestion_id)
            .await?
            .ok_or(ArchiveSuggestionError::NotFound(cmd.suggestion_id))?;

        suggestion.archive()?;
        self.repository.update(&suggestion).await?;
        info!(suggestion_id = %suggestion.id(), "suggestion archived");

        Ok(ArchiveSuggestionResult { suggestion })
    }
}
