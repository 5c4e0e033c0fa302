//! ListSuggestionsHandler - the admin review queue.
//!
//! One filtered, newest-first listing of non-archived suggestions,
//! partitioned into pending and reviewed.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, StatusFilter, UserId};
use crate::domain::suggestion::Suggestion;
use crate::ports::{AccessChecker, SuggestionRepository};

/// Command to list suggestions for review.
#[derive(Debug, Clone)]
pub struct ListSuggestionsCommand {
    pub requested_by: UserId,
    pub filter: StatusFilter,
}

/// Result of listing: two fixed partitions over the same filtered set.
#[derive(Debug, Clone)]
pub struct ListSuggestionsResult {
    /// Suggestions awaiting a decision, newest first.
    pub pending: Vec<Suggestion>,
    /// Suggestions with a decision, newest first.
    pub reviewed: Vec<Suggestion>,
}

impl ListSuggestionsResult {
    /// Total number of listed suggestions.
    pub fn len(&self) -> usize {
        self.pending.len() + self.reviewed.len()
    }

    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.reviewed.is_empty()
    }
}

/// Errors that can occur when listing suggestions.
#[derive(Debug, Clone, Error)]
pub enum ListSuggestionsError {
    /// Caller is not an admin.
    #[error("Forbidden: admin role required")]
    Forbidden,

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for ListSuggestionsError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ListSuggestionsError::Forbidden,
            ErrorCode::DatabaseError => ListSuggestionsError::Repository(err.message),
            _ => ListSuggestionsError::Domain(err.to_string()),
        }
    }
}

/// Handler for ListSuggestions commands.
pub struct ListSuggestionsHandler {
    repository: Arc<dyn SuggestionRepository>,
    access: Arc<dyn AccessChecker>,
}

impl ListSuggestionsHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(repository: Arc<dyn SuggestionRepository>, access: Arc<dyn AccessChecker>) -> Self {
        Self { repository, access }
    }

    /// Lists non-archived suggestions matching the filter, partitioned.
    pub async fn handle(
        &self,
        cmd: ListSuggestionsCommand,
    ) -> Result<ListSuggestionsResult, ListSuggestionsError> {
        self.access.ensure_admin(&cmd.requested_by).await?;

        let suggestions = self.repository.list(cmd.filter).await?;
        let (pending, reviewed) = suggestions
            .into_iter()
            .partition(|s: &Suggestion| !s.status().is_reviewed());

        Ok(ListSuggestionsResult { pending, reviewed })
    }
}
