//! Conversation module - the bounded AI-refinement dialogue.
//!
//! A conversation is an append-only transcript of submitter/assistant
//! turns. The transcript owns the round policy (cap and completion floor);
//! the application layer drives the dialogue against the AI provider port.

mod attachment;
mod message;
pub mod prompts;
mod transcript;

pub use attachment::Attachment;
pub use message::{Author, ChatMessage};
pub use transcript::{Transcript, MAX_ROUNDS, MIN_ROUNDS_TO_COMPLETE};
