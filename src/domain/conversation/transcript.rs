//! Transcript value object - the append-only refinement conversation log.
//!
//! The transcript owns the round policy: a round is one submitter-authored
//! turn, capped at [`MAX_ROUNDS`], and a conversation may be handed off to
//! review once [`MIN_ROUNDS_TO_COMPLETE`] rounds have been exchanged.

use crate::domain::conversation::{Author, ChatMessage};
use crate::domain::foundation::{DomainError, ErrorCode};
use serde::{Deserialize, Serialize};

/// Hard cap on submitter turns per conversation. Bounds AI token spend and
/// keeps the assistant focused.
pub const MAX_ROUNDS: usize = 5;

/// Minimum submitter turns before a suggestion may be submitted for review.
/// Forces at least minimal elaboration of a raw one-liner.
pub const MIN_ROUNDS_TO_COMPLETE: usize = 2;

/// Ordered, append-only conversation log.
///
/// # Invariants
///
/// - message order equals append order, never edited in place
/// - submitter-message count never exceeds `MAX_ROUNDS`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitutes a transcript from persistence (no validation).
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    /// Returns the messages in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if no message has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the last message, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Returns the round count: the number of submitter-authored turns.
    pub fn rounds(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.author() == Author::Submitter)
            .count()
    }

    /// Returns true if the submitter turn cap has been reached.
    pub fn is_at_cap(&self) -> bool {
        self.rounds() >= MAX_ROUNDS
    }

    /// Returns true if the conversation has enough engagement to be
    /// submitted for review. Monotone: once true it stays true, since the
    /// log is append-only.
    pub fn can_complete(&self) -> bool {
        self.rounds() >= MIN_ROUNDS_TO_COMPLETE
    }

    /// Appends a message to the log.
    ///
    /// # Errors
    ///
    /// - `RoundCapReached` when appending a submitter message at the cap
    pub fn append(&mut self, message: ChatMessage) -> Result<(), DomainError> {
        if message.author() == Author::Submitter && self.is_at_cap() {
            return Err(DomainError::new(
                ErrorCode::RoundCapReached,
                format!("Conversation already has {} submitter turns", MAX_ROUNDS),
            ));
        }
        self.messages.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitter(text: &str) -> ChatMessage {
        ChatMessage::submitter(text, Vec::new()).unwrap()
    }

    fn assistant(text: &str) -> ChatMessage {
        ChatMessage::assistant(text).unwrap()
    }

    /// Builds a transcript with the given number of full exchanges.
    fn with_rounds(rounds: usize) -> Transcript {
        let mut transcript = Transcript::new();
        transcript.append(assistant("Hej! Hvilket problem vil du løse?")).unwrap();
        for i in 0..rounds {
            transcript.append(submitter(&format!("Svar {}", i + 1))).unwrap();
            transcript.append(assistant(&format!("Opfølgning {}", i + 1))).unwrap();
        }
        transcript
    }

    #[test]
    fn new_transcript_is_empty_with_zero_rounds() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.rounds(), 0);
        assert!(!transcript.can_complete());
    }

    #[test]
    fn rounds_counts_only_submitter_messages() {
        let transcript = with_rounds(3);
        assert_eq!(transcript.len(), 7);
        assert_eq!(transcript.rounds(), 3);
    }

    #[test]
    fn append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append(assistant("først")).unwrap();
        transcript.append(submitter("dernæst")).unwrap();

        assert_eq!(transcript.messages()[0].content(), "først");
        assert_eq!(transcript.messages()[1].content(), "dernæst");
        assert_eq!(transcript.last().unwrap().content(), "dernæst");
    }

    #[test]
    fn can_complete_requires_two_rounds() {
        assert!(!with_rounds(0).can_complete());
        assert!(!with_rounds(1).can_complete());
        assert!(with_rounds(2).can_complete());
        assert!(with_rounds(5).can_complete());
    }

    #[test]
    fn cap_is_reached_at_five_rounds() {
        assert!(!with_rounds(4).is_at_cap());
        assert!(with_rounds(5).is_at_cap());
    }

    #[test]
    fn append_rejects_submitter_message_at_cap() {
        let mut transcript = with_rounds(5);
        let result = transcript.append(submitter("en til"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::RoundCapReached);
        assert_eq!(transcript.rounds(), 5);
    }

    #[test]
    fn append_allows_assistant_message_at_cap() {
        let mut transcript = with_rounds(5);
        assert!(transcript.append(assistant("opsummering")).is_ok());
    }

    #[test]
    fn serializes_as_bare_message_array() {
        let transcript = with_rounds(1);
        let json = serde_json::to_value(&transcript).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[test]
    fn roundtrips_through_json() {
        let transcript = with_rounds(2);
        let json = serde_json::to_string(&transcript).unwrap();
        let restored: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, transcript);
    }

    mod round_cap_property {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// However submit/append attempts interleave, the submitter
            /// count in the log never exceeds the cap.
            #[test]
            fn submitter_count_never_exceeds_cap(attempts in 0usize..20) {
                let mut transcript = Transcript::new();
                for i in 0..attempts {
                    let _ = transcript.append(submitter(&format!("forsøg {}", i)));
                    let _ = transcript.append(assistant("svar"));
                }
                prop_assert!(transcript.rounds() <= MAX_ROUNDS);
            }

            /// can_complete is monotone in the number of rounds.
            #[test]
            fn can_complete_is_monotone(rounds in 0usize..=MAX_ROUNDS) {
                let transcript = with_rounds(rounds);
                prop_assert_eq!(transcript.can_complete(), rounds >= MIN_ROUNDS_TO_COMPLETE);
            }
        }
    }
}
