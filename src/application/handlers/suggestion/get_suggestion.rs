//! GetSuggestionHandler - direct id lookup.
//!
//! The one read path that also reaches archived suggestions. Accessible to
//! the submitter and to admins.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SuggestionId, UserId};
use crate::domain::suggestion::Suggestion;
use crate::ports::{AccessChecker, SuggestionRepository};

/// Command to fetch one suggestion.
#[derive(Debug, Clone)]
pub struct GetSuggestionCommand {
    pub suggestion_id: SuggestionId,
    pub requested_by: UserId,
}

/// Result of fetching a suggestion.
#[derive(Debug, Clone)]
pub struct GetSuggestionResult {
    pub suggestion: Suggestion,
}

/// Errors that can occur when fetching a suggestion.
#[derive(Debug, Clone, Error)]
pub enum GetSuggestionError {
    /// Suggestion was not found.
    #[error("Suggestion not found: {0}")]
    NotFound(SuggestionId),

    /// Caller is neither the submitter nor an admin.
    #[error("Forbidden: not the submitter and not an admin")]
    Forbidden,

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for GetSuggestionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => GetSuggestionError::Forbidden,
            ErrorCode::DatabaseError => GetSuggestionError::Repository(err.message),
            _ => GetSuggestionError::Domain(err.to_string()),
        }
    }
}

/// Handler for GetSuggestion commands.
pub struct GetSuggestionHandler {
    repository: Arc<dyn SuggestionRepository>,
    access: Arc<dyn AccessChecker>,
}

impl GetSuggestionHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(repository: Arc<dyn SuggestionRepository>, access: Arc<dyn AccessChecker>) -> Self {
        Self { repository, access }
    }

    /// Fetches a suggestion by id, archived or not.
    pub async fn handle(
        &self,
        cmd: GetSuggestionCommand,
    ) -> Result<GetSuggestionResult, GetSuggestionError> {
        let suggestion = self
            .repository
            .find_by_id(&cmd.suggestion_id)
            .await?
            .ok_or(GetSuggestionError::NotFound(cmd.suggestion_id))?;

        if !suggestion.is_owner(&cmd.requested_by)
            && !self.access.is_admin(&cmd.requested_by).await?
        {
            return Err(GetSuggestionError::Forbidden);
        }

        Ok(GetSuggestionResult { suggestion })
    }
}
