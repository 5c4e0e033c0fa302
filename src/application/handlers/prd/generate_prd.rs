//! GeneratePrdHandler - derives a PRD from an approved suggestion.
//!
//! Delegates summarization to the AI collaborator under the fixed
//! expert-product-manager framing. Output is not deterministic; callers
//! must tolerate variance between runs. There are no automatic retries -
//! a failure leaves the suggestion approved and PRD-less, and generation
//! can be re-triggered manually.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::conversation::prompts;
use crate::domain::foundation::{DomainError, ErrorCode, SuggestionId, UserId};
use crate::domain::suggestion::Suggestion;
use crate::ports::{
    AIError, AIProvider, AccessChecker, CompletionRequest, SuggestionRepository, WireRole,
};

/// Command to generate (or regenerate) a suggestion's PRD.
#[derive(Debug, Clone)]
pub struct GeneratePrdCommand {
    pub suggestion_id: SuggestionId,
    pub requested_by: UserId,
}

/// Result of generating a PRD.
#[derive(Debug, Clone)]
pub struct GeneratePrdResult {
    /// The suggestion with the PRD attached.
    pub suggestion: Suggestion,
    /// The generated document.
    pub document: String,
}

/// Errors that can occur during PRD generation.
#[derive(Debug, Clone, Error)]
pub enum GeneratePrdError {
    /// Suggestion was not found.
    #[error("Suggestion not found: {0}")]
    NotFound(SuggestionId),

    /// Caller is not an admin.
    #[error("Forbidden: admin role required")]
    Forbidden,

    /// Suggestion is not approved; a PRD only exists for approved ideas.
    #[error("Suggestion is not approved")]
    NotApproved,

    /// The AI collaborator failed; the suggestion remains approved and
    /// PRD-less, and generation can be retried.
    #[error("PRD generation failed: {0}")]
    Generation(String),

    /// Repository error during persistence.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for GeneratePrdError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => GeneratePrdError::Forbidden,
            ErrorCode::InvalidStateTransition => GeneratePrdError::NotApproved,
            ErrorCode::DatabaseError => GeneratePrdError::Repository(err.message),
            _ => GeneratePrdError::Domain(err.to_string()),
        }
    }
}

impl From<AIError> for GeneratePrdError {
    fn from(err: AIError) -> Self {
        GeneratePrdError::Generation(err.to_string())
    }
}

/// Handler for GeneratePrd commands.
pub struct GeneratePrdHandler {
    repository: Arc<dyn SuggestionRepository>,
    access: Arc<dyn AccessChecker>,
    ai_provider: Arc<dyn AIProvider>,
}

impl GeneratePrdHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        repository: Arc<dyn SuggestionRepository>,
        access: Arc<dyn AccessChecker>,
        ai_provider: Arc<dyn AIProvider>,
    ) -> Self {
        Self {
            repository,
            access,
            ai_provider,
        }
    }

    /// Generates the PRD and attaches it to the approved suggestion.
    /// Overwrites any earlier document on regeneration.
    #[instrument(skip(self, cmd), fields(suggestion_id = %cmd.suggestion_id))]
    pub async fn handle(
        &self,
        cmd: GeneratePrdCommand,
    ) -> Result<GeneratePrdResult, GeneratePrdError> {
        self.access.ensure_admin(&cmd.requested_by).await?;

        let mut suggestion = self
            .repository
            .find_by_id(&cmd.suggestion_id)
            .await?
            .ok_or(GeneratePrdError::NotFound(cmd.suggestion_id))?;

        let request = CompletionRequest::new()
            .with_system_prompt(prompts::PRD_SYSTEM_PROMPT)
            .with_message(
                WireRole::User,
                prompts::prd_instruction(
                    suggestion.title(),
                    suggestion.description(),
                    suggestion.conversation(),
                ),
            )
            .with_temperature(prompts::PRD_TEMPERATURE)
            .with_max_tokens(prompts::PRD_MAX_TOKENS);

        let response = self.ai_provider.complete(request).await?;
        let document = response.content;

        suggestion.attach_prd(document.clone())?;
        self.repository.update(&suggestion).await?;
        info!(suggestion_id = %suggestion.id(), "PRD generated");

        Ok(GeneratePrdResult {
            suggestion,
            document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::access::StubAccessChecker;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::persistence::InMemorySuggestionRepository;
    use crate::domain::conversation::ChatMessage;
    use crate::domain::foundation::{Department, SuggestionStatus};
    use crate::domain::suggestion::ReviewDecision;

    fn admin() -> UserId {
        UserId::new("admin-1").unwrap()
    }

    fn approved_suggestion() -> Suggestion {
        let mut s = Suggestion::new(
            SuggestionId::new(),
            UserId::new("employee-1").unwrap(),
            "Refleksjakke".to_string(),
            "Reflekser for sikkerhed".to_string(),
            Department::Design,
        )
        .unwrap();
        s.open_conversation(ChatMessage::assistant("Hej!").unwrap()).unwrap();
        s.record_exchange(
            ChatMessage::submitter("Børn skal ses i mørke", Vec::new()).unwrap(),
            ChatMessage::assistant("Hvem får gavn af det?").unwrap(),
        )
        .unwrap();
        s.record_exchange(
            ChatMessage::submitter("Skolebørn og forældre", Vec::new()).unwrap(),
            ChatMessage::assistant("Klar til indsendelse!").unwrap(),
        )
        .unwrap();
        let decision = ReviewDecision::new(SuggestionStatus::Approved, None, admin()).unwrap();
        s.apply_decision(&decision).unwrap();
        s
    }

    fn handler(
        repo: Arc<InMemorySuggestionRepository>,
        ai: Arc<MockAIProvider>,
    ) -> GeneratePrdHandler {
        GeneratePrdHandler::new(
            repo,
            Arc::new(StubAccessChecker::with_admins(["admin-1"])),
            ai,
        )
    }

    #[tokio::test]
    async fn generates_and_attaches_document() {
        let s = approved_suggestion();
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let ai = Arc::new(MockAIProvider::new().with_reply("# PRD\n\nRefleksjakker."));

        let result = handler(repo.clone(), ai.clone())
            .handle(GeneratePrdCommand {
                suggestion_id: id,
                requested_by: admin(),
            })
            .await
            .unwrap();

        assert_eq!(result.document, "# PRD\n\nRefleksjakker.");
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.prd(), Some("# PRD\n\nRefleksjakker."));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn request_carries_pm_framing_and_transcript() {
        let s = approved_suggestion();
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let ai = Arc::new(MockAIProvider::new().with_reply("# PRD"));

        handler(repo, ai.clone())
            .handle(GeneratePrdCommand {
                suggestion_id: id,
                requested_by: admin(),
            })
            .await
            .unwrap();

        let call = &ai.calls()[0];
        assert_eq!(
            call.system_prompt.as_deref(),
            Some(prompts::PRD_SYSTEM_PROMPT)
        );
        let instruction = &call.messages[0].content;
        assert!(instruction.contains("Title: Refleksjakke"));
        assert!(instruction.contains("user: Børn skal ses i mørke"));
        assert_eq!(call.temperature, Some(prompts::PRD_TEMPERATURE));
        assert_eq!(call.max_tokens, Some(prompts::PRD_MAX_TOKENS));
    }

    #[tokio::test]
    async fn failure_leaves_suggestion_approved_and_prd_less() {
        let s = approved_suggestion();
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let ai = Arc::new(MockAIProvider::new().with_error(MockError::Timeout {
            timeout_secs: 60,
        }));

        let result = handler(repo.clone(), ai)
            .handle(GeneratePrdCommand {
                suggestion_id: id,
                requested_by: admin(),
            })
            .await;

        assert!(matches!(result, Err(GeneratePrdError::Generation(_))));
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), SuggestionStatus::Approved);
        assert!(stored.prd().is_none());
    }

    #[tokio::test]
    async fn rejects_unapproved_suggestion() {
        let s = Suggestion::new(
            SuggestionId::new(),
            UserId::new("employee-1").unwrap(),
            "Afventende".to_string(),
            "beskrivelse".to_string(),
            Department::Sales,
        )
        .unwrap();
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let ai = Arc::new(MockAIProvider::new().with_reply("# PRD"));

        let result = handler(repo, ai)
            .handle(GeneratePrdCommand {
                suggestion_id: id,
                requested_by: admin(),
            })
            .await;

        assert!(matches!(result, Err(GeneratePrdError::NotApproved)));
    }

    #[tokio::test]
    async fn rejects_non_admin() {
        let s = approved_suggestion();
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let ai = Arc::new(MockAIProvider::new());

        let result = handler(repo, ai.clone())
            .handle(GeneratePrdCommand {
                suggestion_id: id,
                requested_by: UserId::new("employee-1").unwrap(),
            })
            .await;

        assert!(matches!(result, Err(GeneratePrdError::Forbidden)));
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn regeneration_overwrites_existing_document() {
        let mut s = approved_suggestion();
        s.attach_prd("# Gammelt udkast".to_string()).unwrap();
        let id = *s.id();
        let repo = Arc::new(InMemorySuggestionRepository::with_suggestions(vec![s]));
        let ai = Arc::new(MockAIProvider::new().with_reply("# Nyt udkast"));

        handler(repo.clone(), ai)
            .handle(GeneratePrdCommand {
                suggestion_id: id,
                requested_by: admin(),
            })
            .await
            .unwrap();

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.prd(), Some("# Nyt udkast"));
    }
}
