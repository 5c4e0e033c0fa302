//! Suggestion aggregate entity.
//!
//! A suggestion is one submitted idea: its refinement conversation, its
//! review status, and the PRD generated on approval. Suggestions are never
//! deleted; archival hides them from active views.
//!
//! # Invariants
//!
//! - `title` and `description` are non-empty
//! - the conversation is append-only and chronological
//! - submitter-turn count never exceeds the round cap
//! - archival is one-way and only possible after a decision

use crate::domain::conversation::{ChatMessage, Transcript};
use crate::domain::foundation::{
    Department, DomainError, ErrorCode, SuggestionId, SuggestionStatus, Timestamp, UserId,
};
use crate::domain::suggestion::ReviewDecision;
use serde::{Deserialize, Serialize};

/// Maximum length for a suggestion title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Suggestion aggregate - one submitted idea and its review state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Unique identifier for this suggestion.
    id: SuggestionId,

    /// Employee who submitted the idea.
    submitted_by: UserId,

    /// Short title.
    title: String,

    /// Free-text description.
    description: String,

    /// Department the idea belongs to.
    department: Department,

    /// Current review status.
    status: SuggestionStatus,

    /// The refinement conversation log.
    conversation: Transcript,

    /// Notes left by the reviewing admin.
    admin_notes: Option<String>,

    /// Generated requirements document, present only after approval.
    prd: Option<String>,

    /// Soft-delete overlay; hides the suggestion from active views.
    archived: bool,

    /// Admin who made the last decision.
    reviewed_by: Option<UserId>,

    /// When the suggestion was created.
    created_at: Timestamp,

    /// When the suggestion was last updated.
    updated_at: Timestamp,
}

impl Suggestion {
    /// Creates a new pending suggestion with an empty conversation.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title or description is empty, or title too long
    pub fn new(
        id: SuggestionId,
        submitted_by: UserId,
        title: String,
        description: String,
        department: Department,
    ) -> Result<Self, DomainError> {
        Self::validate_title(&title)?;
        Self::validate_description(&description)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            submitted_by,
            title,
            description,
            department,
            status: SuggestionStatus::Pending,
            conversation: Transcript::new(),
            admin_notes: None,
            prd: None,
            archived: false,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a suggestion from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SuggestionId,
        submitted_by: UserId,
        title: String,
        description: String,
        department: Department,
        status: SuggestionStatus,
        conversation: Transcript,
        admin_notes: Option<String>,
        prd: Option<String>,
        archived: bool,
        reviewed_by: Option<UserId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            submitted_by,
            title,
            description,
            department,
            status,
            conversation,
            admin_notes,
            prd,
            archived,
            reviewed_by,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the suggestion ID.
    pub fn id(&self) -> &SuggestionId {
        &self.id
    }

    /// Returns the submitting employee.
    pub fn submitted_by(&self) -> &UserId {
        &self.submitted_by
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the department.
    pub fn department(&self) -> Department {
        self.department
    }

    /// Returns the current status.
    pub fn status(&self) -> SuggestionStatus {
        self.status
    }

    /// Returns the conversation log.
    pub fn conversation(&self) -> &Transcript {
        &self.conversation
    }

    /// Returns the admin notes, if any.
    pub fn admin_notes(&self) -> Option<&str> {
        self.admin_notes.as_deref()
    }

    /// Returns the generated PRD, if any.
    pub fn prd(&self) -> Option<&str> {
        self.prd.as_deref()
    }

    /// Returns true if the suggestion is archived.
    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// Returns the reviewing admin, if a decision has been made.
    pub fn reviewed_by(&self) -> Option<&UserId> {
        self.reviewed_by.as_ref()
    }

    /// Returns when the suggestion was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the suggestion was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns the current round count of the refinement conversation.
    pub fn rounds(&self) -> usize {
        self.conversation.rounds()
    }

    /// Returns true if the conversation may be handed off to review.
    pub fn can_complete(&self) -> bool {
        self.conversation.can_complete()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user submitted this suggestion.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.submitted_by == user_id
    }

    /// Validates that the user owns this suggestion.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not the submitter
    pub fn authorize_submitter(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not the submitter of this suggestion",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversation mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records the assistant's opening message as the first log entry.
    ///
    /// # Errors
    ///
    /// - `ConversationAlreadyStarted` if the log is not empty
    /// - `SuggestionArchived` if archived
    /// - `ValidationFailed` if the opening is not assistant-authored
    pub fn open_conversation(&mut self, opening: ChatMessage) -> Result<(), DomainError> {
        self.ensure_active()?;

        if !self.conversation.is_empty() {
            return Err(DomainError::new(
                ErrorCode::ConversationAlreadyStarted,
                "Conversation already has an opening message",
            ));
        }
        if !opening.is_assistant() {
            return Err(DomainError::validation(
                "opening",
                "Opening message must be assistant-authored",
            ));
        }

        self.conversation.append(opening)?;
        self.touch();
        Ok(())
    }

    /// Appends one confirmed exchange: the submitter turn and the
    /// assistant reply it produced. Only ever called after the AI
    /// collaborator succeeded, so the durable log never holds an
    /// unanswered submitter turn.
    ///
    /// # Errors
    ///
    /// - `SuggestionArchived` if archived
    /// - `RoundCapReached` if the submitter turn cap is already reached
    pub fn record_exchange(
        &mut self,
        submitter_turn: ChatMessage,
        assistant_reply: ChatMessage,
    ) -> Result<usize, DomainError> {
        self.ensure_active()?;

        self.conversation.append(submitter_turn)?;
        self.conversation.append(assistant_reply)?;
        self.touch();
        Ok(self.conversation.rounds())
    }

    /// Hands the refined suggestion off to review.
    ///
    /// The status was already `pending` from creation; this validates the
    /// engagement floor and seals the conversation for review.
    ///
    /// # Errors
    ///
    /// - `SuggestionArchived` if archived
    /// - `MinimumRoundsNotReached` below the completion floor
    /// - `InvalidStateTransition` if a decision has already been made
    pub fn complete_refinement(&mut self) -> Result<(), DomainError> {
        self.ensure_active()?;

        if self.status != SuggestionStatus::Pending {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot complete refinement in status '{}'", self.status),
            ));
        }
        if !self.conversation.can_complete() {
            return Err(DomainError::new(
                ErrorCode::MinimumRoundsNotReached,
                "At least two refinement rounds are required before submission",
            ));
        }

        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Review mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies an admin decision: status, notes, and reviewer identity
    /// update together.
    ///
    /// # Errors
    ///
    /// - `SuggestionArchived` if archived
    /// - `InvalidStateTransition` if the transition matrix forbids it
    pub fn apply_decision(&mut self, decision: &ReviewDecision) -> Result<(), DomainError> {
        self.ensure_active()?;

        let target = decision.target();
        if !self.status.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from '{}' to '{}'", self.status, target),
            ));
        }

        self.status = target;
        self.admin_notes = decision.notes().map(str::to_string);
        self.reviewed_by = Some(decision.decided_by().clone());
        self.touch();
        Ok(())
    }

    /// Archives the suggestion. One-way; only possible after a decision.
    ///
    /// # Errors
    ///
    /// - `SuggestionArchived` if already archived
    /// - `InvalidStateTransition` if still pending
    pub fn archive(&mut self) -> Result<(), DomainError> {
        if self.archived {
            return Err(DomainError::new(
                ErrorCode::SuggestionArchived,
                "Suggestion is already archived",
            ));
        }
        if self.status == SuggestionStatus::Pending {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Pending suggestions cannot be archived",
            ));
        }

        self.archived = true;
        self.touch();
        Ok(())
    }

    /// Corrects title, description, and department, independent of status.
    ///
    /// # Errors
    ///
    /// - `SuggestionArchived` if archived
    /// - `ValidationFailed` if title or description is empty
    pub fn edit(
        &mut self,
        title: String,
        description: String,
        department: Department,
    ) -> Result<(), DomainError> {
        self.ensure_active()?;
        Self::validate_title(&title)?;
        Self::validate_description(&description)?;

        self.title = title;
        self.description = description;
        self.department = department;
        self.touch();
        Ok(())
    }

    /// Stores a generated PRD. Overwrites on manual regeneration.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the suggestion is approved
    /// - `ValidationFailed` if the document is empty
    pub fn attach_prd(&mut self, document: String) -> Result<(), DomainError> {
        if self.status != SuggestionStatus::Approved {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "A PRD can only be attached to an approved suggestion",
            ));
        }
        if document.trim().is_empty() {
            return Err(DomainError::validation("prd", "PRD document cannot be empty"));
        }

        self.prd = Some(document);
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.archived {
            return Err(DomainError::new(
                ErrorCode::SuggestionArchived,
                "Suggestion is archived and cannot be modified",
            ));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_title(title: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title cannot exceed {} characters", MAX_TITLE_LENGTH),
            ));
        }
        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "description",
                "Description cannot be empty",
            ));
        }
        Ok(())
    }
}
