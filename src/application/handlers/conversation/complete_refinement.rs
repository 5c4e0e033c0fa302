//! CompleteRefinementHandler - hands a refined suggestion off to review.
//!
//! A submitter may finish early after two rounds, or after the cap; either
//! way the final conversation is persisted and the suggestion stays
//! review-ready (`pending`).

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SuggestionId, UserId};
use crate::domain::suggestion::Suggestion;
use crate::ports::SuggestionRepository;

/// Command to complete a refinement conversation.
#[derive(Debug, Clone)]
pub struct CompleteRefinementCommand {
    pub suggestion_id: SuggestionId,
    pub submitted_by: UserId,
}

/// Result of completing a refinement.
#[derive(Debug, Clone)]
pub struct CompleteRefinementResult {
    /// The suggestion as handed off to review.
    pub suggestion: Suggestion,
}

/// Errors that can occur when completing a refinement.
#[derive(Debug, Clone, Error)]
pub enum CompleteRefinementError {
    /// Suggestion was not found.
    #[error("Suggestion not found: {0}")]
    NotFound(SuggestionId),

    /// Caller is not the submitter of the suggestion.
    #[error("Forbidden: user did not submit this suggestion")]
    Forbidden,

    /// Fewer than the minimum refinement rounds have been exchanged.
    #[error("At least two refinement rounds are required before submission")]
    BelowMinimumRounds,

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

impl From<DomainError> for CompleteRefinementError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => CompleteRefinementError::Forbidden,
            ErrorCode::MinimumRoundsNotReached => CompleteRefinementError::BelowMinimumRounds,
            ErrorCode::SuggestionArchived => CompleteRefinementError::Archived,
            ErrorCode::DatabaseError => CompleteRefinementError::Repository(err.message),
            _ => CompleteRefinementError::Domain(err.to_string()),
        }
    }
}

/// Handler for CompleteRefinement commands.
pub struct CompleteRefinementHandler {
    repository: Arc<dyn SuggestionRepository>,
}

impl CompleteRefinementHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(repository: Arc<dyn SuggestionRepository>) -> Self {
        Self { repository }
    }

    /// Seals the conversation and persists the review-ready suggestion.
    pub async fn handle(
        &self,
        cmd: CompleteRefinementCommand,
    ) -> Result<CompleteRefinementResult, CompleteRefinementError> {
        let mut suggestion = self
            .repository
            .find_by_id(&cmd.suggestion_id)
            .await?
            .ok_or(CompleteRefinementError::NotFound(cmd.suggestion_id))?;

        suggestion.authorize_submitter(&cmd.submitted_by)?;
        suggestion.complete_refinement()?;
        self.repository.update(&suggestion).await?;

        Ok(CompleteRefinementResult { suggestion })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::InMemorySuggestionRepository;
    use crate::domain::conversation::ChatMessage;
    use crate::domain::foundation::{Department, SuggestionStatus};

    fn submitter() -> UserId {
        UserId::new("employee-1").unwrap()
    }

    fn refined(rounds: usize) -> Suggestion {
        let mut s = Suggestion::new(
            SuggestionId::new(),
            submitter(),
            "Refleksjakke".to_string(),
            "Reflekser for sikkerhed".to_string(),
            Department::Design,
        )
        .unwrap();
        s.open_conversation(ChatMessage::assistant("Hej!").unwrap()).unwrap();
        for i in 0..rounds {
            s.record_exchange(
                ChatMessage::submitter(format!("svar {}", i), Vec::new()).unwrap(),
                ChatMessage::assistant("opfølgning").unwrap(),
            )
            .unwrap();
        }
        s
    }

    #[tokio::test]
    async fn completes_after_two_rounds() {
        let s = refined(2);
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let handler = CompleteRefinementHandler::new(repo.clone());

        let result = handler
            .handle(CompleteRefinementCommand {
                suggestion_id: id,
                submitted_by: submitter(),
            })
            .await
            .unwrap();

        assert_eq!(result.suggestion.status(), SuggestionStatus::Pending);
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.conversation().len(), 5);
    }

    #[tokio::test]
    async fn rejects_completion_below_two_rounds() {
        let s = refined(1);
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let handler = CompleteRefinementHandler::new(repo);

        let result = handler
            .handle(CompleteRefinementCommand {
                suggestion_id: id,
                submitted_by: submitter(),
            })
            .await;

        assert!(matches!(
            result,
            Err(CompleteRefinementError::BelowMinimumRounds)
        ));
    }

    #[tokio::test]
    async fn completes_at_the_round_cap() {
        let s = refined(5);
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let handler = CompleteRefinementHandler::new(repo);

        let result = handler
            .handle(CompleteRefinementCommand {
                suggestion_id: id,
                submitted_by: submitter(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_non_owner() {
        let s = refined(2);
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let handler = CompleteRefinementHandler::new(repo);

        let result = handler
            .handle(CompleteRefinementCommand {
                suggestion_id: id,
                submitted_by: UserId::new("employee-2").unwrap(),
            })
            .await;

        assert!(matches!(result, Err(CompleteRefinementError::Forbidden)));
    }

    #[tokio::test]
    async fn fails_when_suggestion_not_found() {
        let repo = Arc::new(InMemorySuggestionRepository::new());
        let handler = CompleteRefinementHandler::new(repo);

        let result = handler
            .handle(CompleteRefinementCommand {
                suggestion_id: SuggestionId::new(),
                submitted_by: submitter(),
            })
            .await;

        assert!(matches!(result, Err(CompleteRefinementError::NotFound(_))));
    }
}
