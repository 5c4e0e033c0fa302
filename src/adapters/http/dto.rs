//! HTTP DTOs for the suggestion and review endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{Attachment, ChatMessage, Transcript};
use crate::domain::foundation::{Department, DomainError, StatusFilter, SuggestionStatus};
use crate::domain::suggestion::Suggestion;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new suggestion.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSuggestionRequest {
    pub title: String,
    pub description: String,
    pub department: Department,
}

/// Request to submit one chat turn.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTurnRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentDto>,
}

/// Request to record an admin decision.
#[derive(Debug, Clone, Deserialize)]
pub struct DecideRequest {
    pub status: SuggestionStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to correct suggestion metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct EditSuggestionRequest {
    pub title: String,
    pub description: String,
    pub department: Department,
}

/// Query parameters for the admin listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSuggestionsQuery {
    #[serde(default)]
    pub filter: StatusFilter,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Attachment metadata on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentDto {
    pub url: String,
    pub name: String,
    pub mime_type: String,
}

impl AttachmentDto {
    /// Converts into the domain attachment, validating fields.
    pub fn into_domain(self) -> Result<Attachment, DomainError> {
        Attachment::new(self.url, self.name, self.mime_type)
    }

    fn from_domain(attachment: &Attachment) -> Self {
        Self {
            url: attachment.url().to_string(),
            name: attachment.name().to_string(),
            mime_type: attachment.mime_type().to_string(),
        }
    }
}

/// One conversation message on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentDto>,
    pub created_at: String,
}

impl MessageResponse {
    fn from_domain(message: &ChatMessage) -> Self {
        Self {
            role: message.author().as_str().to_string(),
            content: message.content().to_string(),
            attachments: message
                .attachments()
                .iter()
                .map(AttachmentDto::from_domain)
                .collect(),
            created_at: message.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// The conversation log with round bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub messages: Vec<MessageResponse>,
    pub round: usize,
    pub max_rounds: usize,
    pub can_complete: bool,
}

impl ConversationResponse {
    /// Builds the response from a transcript.
    pub fn from_transcript(transcript: &Transcript) -> Self {
        Self {
            messages: transcript
                .messages()
                .iter()
                .map(MessageResponse::from_domain)
                .collect(),
            round: transcript.rounds(),
            max_rounds: crate::domain::conversation::MAX_ROUNDS,
            can_complete: transcript.can_complete(),
        }
    }
}

/// Full suggestion view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    pub id: String,
    pub submitted_by: String,
    pub title: String,
    pub description: String,
    pub department: Department,
    pub status: SuggestionStatus,
    pub round: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prd: Option<String>,
    pub archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl SuggestionResponse {
    /// Builds the response from the aggregate.
    pub fn from_domain(suggestion: &Suggestion) -> Self {
        Self {
            id: suggestion.id().to_string(),
            submitted_by: suggestion.submitted_by().to_string(),
            title: suggestion.title().to_string(),
            description: suggestion.description().to_string(),
            department: suggestion.department(),
            status: suggestion.status(),
            round: suggestion.rounds(),
            admin_notes: suggestion.admin_notes().map(str::to_string),
            prd: suggestion.prd().map(str::to_string),
            archived: suggestion.is_archived(),
            reviewed_by: suggestion.reviewed_by().map(|u| u.to_string()),
            created_at: suggestion.created_at().as_datetime().to_rfc3339(),
            updated_at: suggestion.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// The admin review queue: two partitions over one filtered listing.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewListResponse {
    pub pending: Vec<SuggestionResponse>,
    pub reviewed: Vec<SuggestionResponse>,
}

/// Decision outcome, with the PRD warning when generation failed.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionResponse {
    pub suggestion: SuggestionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prd_warning: Option<String>,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SuggestionId, UserId};

    #[test]
    fn suggestion_response_maps_all_fields() {
        let suggestion = Suggestion::new(
            SuggestionId::new(),
            UserId::new("employee-1").unwrap(),
            "Titel".to_string(),
            "Beskrivelse".to_string(),
            Department::Design,
        )
        .unwrap();

        let dto = SuggestionResponse::from_domain(&suggestion);
        assert_eq!(dto.title, "Titel");
        assert_eq!(dto.status, SuggestionStatus::Pending);
        assert_eq!(dto.round, 0);
        assert!(!dto.archived);
        assert!(dto.prd.is_none());
    }

    #[test]
    fn conversation_response_tracks_rounds() {
        let mut transcript = Transcript::new();
        transcript
            .append(ChatMessage::assistant("Hej!").unwrap())
            .unwrap();
        transcript
            .append(ChatMessage::submitter("Svar", Vec::new()).unwrap())
            .unwrap();

        let dto = ConversationResponse::from_transcript(&transcript);
        assert_eq!(dto.messages.len(), 2);
        assert_eq!(dto.round, 1);
        assert_eq!(dto.max_rounds, 5);
        assert!(!dto.can_complete);
        assert_eq!(dto.messages[0].role, "assistant");
        assert_eq!(dto.messages[1].role, "user");
    }

    #[test]
    fn attachment_dto_roundtrips_to_domain() {
        let dto = AttachmentDto {
            url: "https://files/1".to_string(),
            name: "foto.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
        };
        let attachment = dto.into_domain().unwrap();
        assert_eq!(attachment.name(), "foto.jpg");
    }

    #[test]
    fn list_query_defaults_to_all() {
        let query: ListSuggestionsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.filter, StatusFilter::All);
    }

    #[test]
    fn decide_request_parses_snake_case_status() {
        let req: DecideRequest =
            serde_json::from_str(r#"{"status":"more_info_needed","notes":"uddyb"}"#).unwrap();
        assert_eq!(req.status, SuggestionStatus::MoreInfoNeeded);
        assert_eq!(req.notes.as_deref(), Some("uddyb"));
    }
}
