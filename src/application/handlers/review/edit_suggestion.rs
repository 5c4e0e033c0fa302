//! EditSuggestionHandler - admin correction of suggestion metadata.
//!
//! Title, description, and department can be corrected independent of any
//! status decision.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{Department, DomainError, ErrorCode, SuggestionId, UserId};
use crate::domain::suggestion::Suggestion;
use crate::ports::{AccessChecker, SuggestionRepository};

/// Command to edit a suggestion's metadata.
#[derive(Debug, Clone)]
pub struct EditSuggestionCommand {
    pub suggestion_id: SuggestionId,
    pub edited_by: UserId,
    pub title: String,
    pub description: String,
    pub department: Department,
}

/// Result of editing.
#[derive(Debug, Clone)]
pub struct EditSuggestionResult {
    pub suggestion: Suggestion,
}

/// Errors that can occur when editing a suggestion.
#[derive(Debug, Clone, Error)]
pub enum EditSuggestionError {
    /// Suggestion was not found.
    #[error("Suggestion not found: {0}")]
    NotFound(SuggestionId),

    /// Caller is not an admin.
    #[error("Forbidden: admin role required")]
    Forbidden,

    /// Title or description failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Suggestion is archived.
    #[error("Suggestion is archived")]
    Archived,

    /// Repository error during persistence.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for EditSuggestionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => EditSuggestionError::Forbidden,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                EditSuggestionError::Validation(err.message)
            }
            ErrorCode::SuggestionArchived => EditSuggestionError::Archived,
            ErrorCode::DatabaseError => EditSuggestionError::Repository(err.message),
            _ => EditSuggestionError::Domain(err.to_string()),
        }
    }
}

/// Handler for EditSuggestion commands.
pub struct EditSuggestionHandler {
    repository: Arc<dyn SuggestionRepository>,
    access: Arc<dyn AccessChecker>,
}

impl EditSuggestionHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(repository: Arc<dyn SuggestionRepository>, access: Arc<dyn AccessChecker>) -> Self {
        Self { repository, access }
    }

    /// Applies the metadata correction.
    pub async fn handle(
        &self,
        cmd: EditSuggestionCommand,
    ) -> Result<EditSuggestionResult, EditSuggestionError> {
        self.access.ensure_admin(&cmd.edited_by).await?;

        let mut suggestion = self
            .repository
            .find_by_id(&cmd.suggestion_id)
            .await?
            .ok_or(EditSuggestionError::NotFound(cmd.suggestion_id))?;

        suggestion.edit(
            cmd.title.trim().to_string(),
            cmd.description.trim().to_string(),
            cmd.department,
        )?;
        self.repository.update(&suggestion).await?;

        Ok(EditSuggestionResult { suggestion })
    }
}
