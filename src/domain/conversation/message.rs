//! ChatMessage entity - one turn in a refinement conversation.
//!
//! Messages are immutable records of submitter/assistant exchanges.
//! The persisted author values are the `user`/`assistant` strings the
//! product has always stored in its conversation logs.

use crate::domain::conversation::Attachment;
use crate::domain::foundation::{DomainError, MessageId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Author of a conversation turn. Exactly two variants; the system framing
/// sent to the AI provider is never part of the stored log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Author {
    /// The employee refining their suggestion.
    #[serde(rename = "user")]
    Submitter,
    /// The AI assistant.
    #[serde(rename = "assistant")]
    Assistant,
}

impl Author {
    /// Returns the wire label used in prompts and persisted logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::Submitter => "user",
            Author::Assistant => "assistant",
        }
    }
}

/// An immutable message within a refinement conversation.
///
/// # Invariants
///
/// - `content` is non-empty (validated at construction)
/// - attachments only ever accompany submitter messages
/// - never edited once appended to a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier for this message.
    id: MessageId,

    /// Who authored the turn. Persisted under the `role` key the
    /// conversation logs have always used.
    #[serde(rename = "role")]
    author: Author,

    /// The message text.
    content: String,

    /// Files attached to this turn (submitter turns only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment>,

    /// When the message was created.
    created_at: Timestamp,
}

impl ChatMessage {
    /// Creates a submitter message, optionally carrying attachments.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn submitter(
        content: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: MessageId::new(),
            author: Author::Submitter,
            content,
            attachments,
            created_at: Timestamp::now(),
        })
    }

    /// Creates an assistant message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn assistant(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: MessageId::new(),
            author: Author::Assistant,
            content,
            attachments: Vec::new(),
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        author: Author,
        content: String,
        attachments: Vec<Attachment>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            author,
            content,
            attachments,
            created_at,
        }
    }

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the author.
    pub fn author(&self) -> Author {
        self.author
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the attachments.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns when the message was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns true if this message is from the submitter.
    pub fn is_submitter(&self) -> bool {
        self.author == Author::Submitter
    }

    /// Returns true if this message is from the assistant.
    pub fn is_assistant(&self) -> bool {
        self.author == Author::Assistant
    }

    /// Returns the content with attachment annotations folded in, as sent
    /// to the AI collaborator. The stored content is left untouched.
    pub fn annotated_content(&self) -> String {
        if self.attachments.is_empty() {
            return self.content.clone();
        }

        let mut out = self.content.clone();
        for attachment in &self.attachments {
            out.push('\n');
            out.push_str(&attachment.annotation());
        }
        out
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content").into());
        }
        Ok(())
    }
}
