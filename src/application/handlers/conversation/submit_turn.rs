//! SubmitTurnHandler - one round of the bounded refinement dialogue.
//!
//! Validates the turn, calls the AI collaborator with the full history and
//! the attachment-annotated new message, and persists the confirmed
//! exchange. The durable log only ever advances when the collaborator
//! succeeded; a failed call leaves no trace and the same turn can be
//! retried safely.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::conversation::{prompts, Attachment, ChatMessage, Transcript};
use crate::domain::foundation::{DomainError, ErrorCode, SuggestionId, UserId};
use crate::ports::{AIError, AIProvider, CompletionRequest, SuggestionRepository, WireRole};

/// Command to submit one refinement turn.
#[derive(Debug, Clone)]
pub struct SubmitTurnCommand {
    /// The suggestion being refined.
    pub suggestion_id: SuggestionId,
    /// The submitting employee.
    pub submitted_by: UserId,
    /// Turn text; may be empty when attachments are present.
    pub text: String,
    /// Files attached to this turn.
    pub attachments: Vec<Attachment>,
}

/// Result of a successful turn.
#[derive(Debug, Clone)]
pub struct SubmitTurnResult {
    /// The conversation log including the new exchange.
    pub conversation: Transcript,
    /// The round count after this turn.
    pub round: usize,
}

/// Errors that can occur when submitting a turn.
#[derive(Debug, Clone, Error)]
pub enum SubmitTurnError {
    /// Suggestion was not found.
    #[error("Suggestion not found: {0}")]
    NotFound(SuggestionId),

    /// Caller is not the submitter of the suggestion.
    #[error("Forbidden: user did not submit this suggestion")]
    Forbidden,

    /// Turn had no text and no attachments; nothing was done.
    #[error("Validation error: turn needs text or at least one attachment")]
    EmptyTurn,

    /// The submitter turn cap is reached; nothing was done.
    #[error("Conversation has reached the round cap")]
    RoundCapReached,

    /// Suggestion is archived.
    #[error("Suggestion is archived")]
    Archived,

    /// The AI collaborator failed; the turn was not persisted and can be
    /// retried with the same input.
    #[error("Assistant error: {0}")]
    Assistant(String),

    /// Repository error during persistence.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for SubmitTurnError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => SubmitTurnError::Forbidden,
            ErrorCode::RoundCapReached => SubmitTurnError::RoundCapReached,
            ErrorCode::SuggestionArchived => SubmitTurnError::Archived,
            ErrorCode::DatabaseError => SubmitTurnError::Repository(err.message),
            _ => SubmitTurnError::Domain(err.to_string()),
        }
    }
}

impl From<AIError> for SubmitTurnError {
    fn from(err: AIError) -> Self {
        SubmitTurnError::Assistant(err.to_string())
    }
}

/// Handler for SubmitTurn commands.
pub struct SubmitTurnHandler {
    repository: Arc<dyn SuggestionRepository>,
    ai_provider: Arc<dyn AIProvider>,
}

impl SubmitTurnHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        repository: Arc<dyn SuggestionRepository>,
        ai_provider: Arc<dyn AIProvider>,
    ) -> Self {
        Self {
            repository,
            ai_provider,
        }
    }

    /// Runs one refinement round.
    #[instrument(skip(self, cmd), fields(suggestion_id = %cmd.suggestion_id))]
    pub async fn handle(&self, cmd: SubmitTurnCommand) -> Result<SubmitTurnResult, SubmitTurnError> {
        // Validation first: no state change, no collaborator call.
        let text = cmd.text.trim();
        if text.is_empty() && cmd.attachments.is_empty() {
            return Err(SubmitTurnError::EmptyTurn);
        }

        let mut suggestion = self
            .repository
            .find_by_id(&cmd.suggestion_id)
            .await?
            .ok_or(SubmitTurnError::NotFound(cmd.suggestion_id))?;

        suggestion.authorize_submitter(&cmd.submitted_by)?;

        if suggestion.conversation().is_at_cap() {
            return Err(SubmitTurnError::RoundCapReached);
        }

        let effective_text = if text.is_empty() {
            prompts::ATTACHMENT_ONLY_PLACEHOLDER.to_string()
        } else {
            text.to_string()
        };
        let submitter_turn = ChatMessage::submitter(effective_text, cmd.attachments)?;

        // This turn is being asked in round `rounds + 1`.
        let round = suggestion.rounds() + 1;
        let request = Self::build_request(suggestion.conversation(), &submitter_turn, round);

        let response = self.ai_provider.complete(request).await?;
        let reply = response.content.trim();
        if reply.is_empty() {
            return Err(SubmitTurnError::Assistant("assistant reply was empty".to_string()));
        }
        let assistant_reply = ChatMessage::assistant(reply)?;

        let round = suggestion.record_exchange(submitter_turn, assistant_reply)?;
        self.repository.update(&suggestion).await?;

        debug!(round, "refinement turn persisted");
        Ok(SubmitTurnResult {
            conversation: suggestion.conversation().clone(),
            round,
        })
    }

    /// Builds the completion request: persona framing for the current
    /// round, full stored history, and the new message with attachment
    /// metadata folded into its text.
    fn build_request(
        history: &Transcript,
        submitter_turn: &ChatMessage,
        round: usize,
    ) -> CompletionRequest {
        let mut request = CompletionRequest::new()
            .with_system_prompt(prompts::refinement_system_prompt(round))
            .with_temperature(prompts::CHAT_TEMPERATURE)
            .with_max_tokens(prompts::CHAT_MAX_TOKENS);

        for message in history.messages() {
            let role = if message.is_submitter() {
                WireRole::User
            } else {
                WireRole::Assistant
            };
            request = request.with_message(role, message.content());
        }

        request.with_message(WireRole::User, submitter_turn.annotated_content())
    }
}
