//! DecideSuggestionHandler - applies an admin review decision.
//!
//! Status, notes, and reviewer identity update atomically. Approval
//! triggers PRD generation exactly once per approval action; a generation
//! failure never reverts the approval - it surfaces as a warning instead.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::application::handlers::prd::{GeneratePrdCommand, GeneratePrdHandler};
use crate::domain::foundation::{DomainError, ErrorCode, SuggestionId, SuggestionStatus, UserId};
use crate::domain::suggestion::{ReviewDecision, Suggestion};
use crate::ports::{AccessChecker, SuggestionRepository};

/// Command to decide on a suggestion.
#[derive(Debug, Clone)]
pub struct DecideSuggestionCommand {
    pub suggestion_id: SuggestionId,
    pub decided_by: UserId,
    /// Target status; never `Pending`.
    pub target: SuggestionStatus,
    /// Optional free-text notes for the submitter.
    pub notes: Option<String>,
}

/// Result of a decision.
#[derive(Debug, Clone)]
pub struct DecideSuggestionResult {
    /// The suggestion after the decision (and, on approval, after PRD
    /// generation if it succeeded).
    pub suggestion: Suggestion,
    /// Set when the decision was an approval but PRD generation failed.
    /// The approval itself is durable.
    pub prd_warning: Option<String>,
}

/// Errors that can occur when deciding on a suggestion.
#[derive(Debug, Clone, Error)]
pub enum DecideSuggestionError {
    /// Suggestion was not found.
    #[error("Suggestion not found: {0}")]
    NotFound(SuggestionId),

    /// Caller is not an admin.
    #[error("Forbidden: admin role required")]
    Forbidden,

    /// The transition matrix forbids this decision.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

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

impl From<DomainError> for DecideSuggestionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => DecideSuggestionError::Forbidden,
            ErrorCode::InvalidStateTransition => DecideSuggestionError::InvalidTransition(err.message),
            ErrorCode::SuggestionArchived => DecideSuggestionError::Archived,
            ErrorCode::DatabaseError => DecideSuggestionError::Repository(err.message),
            _ => DecideSuggestionError::Domain(err.to_string()),
        }
    }
}

/// Handler for DecideSuggestion commands.
pub struct DecideSuggestionHandler {
    repository: Arc<dyn SuggestionRepository>,
    access: Arc<dyn AccessChecker>,
    prd_generator: Arc<GeneratePrdHandler>,
}

impl DecideSuggestionHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        repository: Arc<dyn SuggestionRepository>,
        access: Arc<dyn AccessChecker>,
        prd_generator: Arc<GeneratePrdHandler>,
    ) -> Self {
        Self {
            repository,
            access,
            prd_generator,
        }
    }

    /// Applies the decision, then attempts PRD generation on approval.
    #[instrument(skip(self, cmd), fields(suggestion_id = %cmd.suggestion_id, target = %cmd.target))]
    pub async fn handle(
        &self,
        cmd: DecideSuggestionCommand,
    ) -> Result<DecideSuggestionResult, DecideSuggestionError> {
        self.access.ensure_admin(&cmd.decided_by).await?;

        let mut suggestion = self
            .repository
            .find_by_id(&cmd.suggestion_id)
            .await?
            .ok_or(DecideSuggestionError::NotFound(cmd.suggestion_id))?;

        let decision = ReviewDecision::new(cmd.target, cmd.notes, cmd.decided_by.clone())?;
        let is_approval = decision.is_approval();

        suggestion.apply_decision(&decision)?;
        self.repository.update(&suggestion).await?;
        info!(status = %suggestion.status(), "decision recorded");

        // The decision is durable at this point. PRD generation runs after
        // it and must not undo it.
        let mut prd_warning = None;
        if is_approval {
            match self
                .prd_generator
                .handle(GeneratePrdCommand {
                    suggestion_id: cmd.suggestion_id,
                    requested_by: cmd.decided_by,
                })
                .await
            {
                Ok(generated) => suggestion = generated.suggestion,
                Err(err) => {
                    warn!(error = %err, "PRD generation failed after approval");
                    prd_warning = Some(err.to_string());
                }
            }
        }

        Ok(DecideSuggestionResult {
            suggestion,
            prd_warning,
        })
    }
}
