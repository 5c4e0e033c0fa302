//! ReviewDecision value object - one admin decision, applied atomically.

use crate::domain::foundation::{DomainError, ErrorCode, SuggestionStatus, UserId};

/// The outcome of an admin review action: target status, optional notes,
/// and the acting admin. Applied to a suggestion as a single mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDecision {
    target: SuggestionStatus,
    notes: Option<String>,
    decided_by: UserId,
}

impl ReviewDecision {
    /// Creates a decision.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the target is `Pending` (no decision
    ///   ever moves a suggestion back to pending)
    pub fn new(
        target: SuggestionStatus,
        notes: Option<String>,
        decided_by: UserId,
    ) -> Result<Self, DomainError> {
        if !target.is_reviewed() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "A review decision cannot target the pending status",
            ));
        }

        // Blank notes are stored as absent.
        let notes = notes.filter(|n| !n.trim().is_empty());

        Ok(Self {
            target,
            notes,
            decided_by,
        })
    }

    /// Returns the target status.
    pub fn target(&self) -> SuggestionStatus {
        self.target
    }

    /// Returns the admin notes, if any.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the acting admin.
    pub fn decided_by(&self) -> &UserId {
        &self.decided_by
    }

    /// Returns true if this decision approves the suggestion.
    pub fn is_approval(&self) -> bool {
        self.target == SuggestionStatus::Approved
    }
}
