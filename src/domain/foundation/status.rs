//! SuggestionStatus enum and the review transition matrix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Review status of a suggestion.
///
/// Archival is deliberately not a status: it is a boolean overlay on the
/// suggestion, settable from any non-pending status, and one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    /// Awaiting admin review (initial state, also the state a finished
    /// refinement conversation hands off in).
    #[default]
    Pending,
    /// Accepted by an admin; a PRD is generated on entry.
    Approved,
    /// Declined by an admin.
    Rejected,
    /// Sent back for elaboration; a further decision may still be made.
    MoreInfoNeeded,
}

impl SuggestionStatus {
    /// Returns true if an admin has made a decision (anything but pending).
    pub fn is_reviewed(&self) -> bool {
        !matches!(self, SuggestionStatus::Pending)
    }

    /// Returns true if a decision may be taken while in this status.
    ///
    /// Decisions are allowed from `Pending` and from `MoreInfoNeeded`
    /// (the latter is re-enterable); `Approved` and `Rejected` are final.
    pub fn accepts_decision(&self) -> bool {
        matches!(
            self,
            SuggestionStatus::Pending | SuggestionStatus::MoreInfoNeeded
        )
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Pending -> Approved | Rejected | MoreInfoNeeded
    /// - MoreInfoNeeded -> Approved | Rejected | MoreInfoNeeded
    ///
    /// Nothing transitions back to Pending.
    pub fn can_transition_to(&self, target: &SuggestionStatus) -> bool {
        self.accepts_decision() && target.is_reviewed()
    }

    /// Returns the persisted string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Approved => "approved",
            SuggestionStatus::Rejected => "rejected",
            SuggestionStatus::MoreInfoNeeded => "more_info_needed",
        }
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SuggestionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SuggestionStatus::Pending),
            "approved" => Ok(SuggestionStatus::Approved),
            "rejected" => Ok(SuggestionStatus::Rejected),
            "more_info_needed" => Ok(SuggestionStatus::MoreInfoNeeded),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// Listing filter over suggestion statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
    MoreInfoNeeded,
}

impl StatusFilter {
    /// Returns true if a suggestion with the given status matches.
    pub fn matches(&self, status: SuggestionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == SuggestionStatus::Pending,
            StatusFilter::Approved => status == SuggestionStatus::Approved,
            StatusFilter::Rejected => status == SuggestionStatus::Rejected,
            StatusFilter::MoreInfoNeeded => status == SuggestionStatus::MoreInfoNeeded,
        }
    }
}
