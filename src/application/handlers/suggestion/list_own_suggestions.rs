//! ListOwnSuggestionsHandler - the submitter's dashboard listing.
//!
//! Submitters always see their full history, archived entries included.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::suggestion::Suggestion;
use crate::ports::SuggestionRepository;

/// Command to list a submitter's own suggestions.
#[derive(Debug, Clone)]
pub struct ListOwnSuggestionsCommand {
    pub submitted_by: UserId,
}

/// Result of listing a submitter's suggestions, newest first.
#[derive(Debug, Clone)]
pub struct ListOwnSuggestionsResult {
    pub suggestions: Vec<Suggestion>,
}

/// Errors that can occur when listing own suggestions.
#[derive(Debug, Clone, Error)]
pub enum ListOwnSuggestionsError {
    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<DomainError> for ListOwnSuggestionsError {
    fn from(err: DomainError) -> Self {
        ListOwnSuggestionsError::Repository(err.to_string())
    }
}

/// Handler for ListOwnSuggestions commands.
pub struct ListOwnSuggestionsHandler {
    repository: Arc<dyn SuggestionRepository>,
}

impl ListOwnSuggestionsHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(repository: Arc<dyn SuggestionRepository>) -> Self {
        Self { repository }
    }

    /// Lists the caller's suggestions, newest first.
    pub async fn handle(
        &self,
        cmd: ListOwnSuggestionsCommand,
    ) -> Result<ListOwnSuggestionsResult, ListOwnSuggestionsError> {
        let suggestions = self.repository.list_by_submitter(&cmd.submitted_by).await?;
        Ok(ListOwnSuggestionsResult { suggestions })
    }
}
