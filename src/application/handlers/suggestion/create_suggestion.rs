//! CreateSuggestionHandler - intake of a new idea.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::foundation::{Department, DomainError, ErrorCode, SuggestionId, UserId};
use crate::domain::suggestion::Suggestion;
use crate::ports::SuggestionRepository;

/// Command to create a suggestion.
#[derive(Debug, Clone)]
pub struct CreateSuggestionCommand {
    pub submitted_by: UserId,
    pub title: String,
    pub description: String,
    pub department: Department,
}

/// Result of creating a suggestion.
#[derive(Debug, Clone)]
pub struct CreateSuggestionResult {
    /// The newly created, pending suggestion.
    pub suggestion: Suggestion,
}

/// Errors that can occur when creating a suggestion.
#[derive(Debug, Clone, Error)]
pub enum CreateSuggestionError {
    /// Title or description failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Repository error during persistence.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for CreateSuggestionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                CreateSuggestionError::Validation(err.message)
            }
            ErrorCode::DatabaseError => CreateSuggestionError::Repository(err.message),
            _ => CreateSuggestionError::Domain(err.to_string()),
        }
    }
}

/// Handler for CreateSuggestion commands.
pub struct CreateSuggestionHandler {
    repository: Arc<dyn SuggestionRepository>,
}

impl CreateSuggestionHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(repository: Arc<dyn SuggestionRepository>) -> Self {
        Self { repository }
    }

    /// Creates and persists a pending suggestion with an empty conversation.
    pub async fn handle(
        &self,
        cmd: CreateSuggestionCommand,
    ) -> Result<CreateSuggestionResult, CreateSuggestionError> {
        let suggestion = Suggestion::new(
            SuggestionId::new(),
            cmd.submitted_by,
            cmd.title.trim().to_string(),
            cmd.description.trim().to_string(),
            cmd.department,
        )?;

        self.repository.insert(&suggestion).await?;
        info!(suggestion_id = %suggestion.id(), department = %suggestion.department(), "suggestion created");

        Ok(CreateSuggestionResult { suggestion })
    }
}
