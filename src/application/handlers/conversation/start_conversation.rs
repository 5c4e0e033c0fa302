//! StartConversationHandler - opens the refinement dialogue.
//!
//! Synthesizes the assistant's opening message for a suggestion with no
//! prior conversation: a personalized greeting from the AI collaborator,
//! or the fixed product greeting when the collaborator fails.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::conversation::{prompts, ChatMessage, Transcript};
use crate::domain::foundation::{DomainError, ErrorCode, SuggestionId, UserId};
use crate::ports::{AIProvider, CompletionRequest, SuggestionRepository};

/// Command to open a suggestion's refinement conversation.
#[derive(Debug, Clone)]
pub struct StartConversationCommand {
    pub suggestion_id: SuggestionId,
    pub requested_by: UserId,
}

/// How the opening message was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningKind {
    /// Greeting produced by the AI collaborator.
    Personalized,
    /// Fixed greeting used because the collaborator failed.
    Fallback,
    /// The conversation already had messages; nothing was synthesized.
    Existing,
}

/// Result of opening a conversation.
#[derive(Debug, Clone)]
pub struct StartConversationResult {
    /// The conversation log after opening.
    pub conversation: Transcript,
    /// Where the opening message came from.
    pub opening: OpeningKind,
}

/// Errors that can occur when opening a conversation.
#[derive(Debug, Clone, Error)]
pub enum StartConversationError {
    /// Suggestion was not found.
    #[error("Suggestion not found: {0}")]
    NotFound(SuggestionId),

    /// Caller is not the submitter of the suggestion.
    #[error("Forbidden: user did not submit this suggestion")]
    Forbidden,

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

impl From<DomainError> for StartConversationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => StartConversationError::Forbidden,
            ErrorCode::SuggestionArchived => StartConversationError::Archived,
            ErrorCode::DatabaseError => StartConversationError::Repository(err.message),
            _ => StartConversationError::Domain(err.to_string()),
        }
    }
}

/// Handler for StartConversation commands.
pub struct StartConversationHandler {
    repository: Arc<dyn SuggestionRepository>,
    ai_provider: Arc<dyn AIProvider>,
}

impl StartConversationHandler {
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

    /// Opens the conversation, persisting the assistant's opening message.
    ///
    /// Idempotent: a suggestion whose conversation has already started gets
    /// its existing log back unchanged.
    pub async fn handle(
        &self,
        cmd: StartConversationCommand,
    ) -> Result<StartConversationResult, StartConversationError> {
        let mut suggestion = self
            .repository
            .find_by_id(&cmd.suggestion_id)
            .await?
            .ok_or(StartConversationError::NotFound(cmd.suggestion_id))?;

        suggestion.authorize_submitter(&cmd.requested_by)?;

        if !suggestion.conversation().is_empty() {
            return Ok(StartConversationResult {
                conversation: suggestion.conversation().clone(),
                opening: OpeningKind::Existing,
            });
        }

        let (opening_text, opening) = self
            .personalized_greeting(suggestion.title(), suggestion.description())
            .await;

        let opening_message = ChatMessage::assistant(opening_text)?;
        suggestion.open_conversation(opening_message)?;
        self.repository.update(&suggestion).await?;

        Ok(StartConversationResult {
            conversation: suggestion.conversation().clone(),
            opening,
        })
    }

    /// Asks the AI collaborator for a personalized greeting; falls back to
    /// the fixed product greeting on any failure, including a blank reply.
    async fn personalized_greeting(
        &self,
        title: &str,
        description: &str,
    ) -> (String, OpeningKind) {
        let request = CompletionRequest::new()
            .with_system_prompt(prompts::refinement_system_prompt(1))
            .with_message(
                crate::ports::WireRole::User,
                prompts::greeting_instruction(title, description),
            )
            .with_temperature(prompts::CHAT_TEMPERATURE)
            .with_max_tokens(prompts::CHAT_MAX_TOKENS);

        match self.ai_provider.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                (response.content, OpeningKind::Personalized)
            }
            Ok(_) => {
                warn!(title, "AI greeting was empty, using fallback");
                (prompts::fallback_greeting(title, description), OpeningKind::Fallback)
            }
            Err(err) => {
                warn!(title, error = %err, "AI greeting failed, using fallback");
                (prompts::fallback_greeting(title, description), OpeningKind::Fallback)
            }
        }
    }
}
