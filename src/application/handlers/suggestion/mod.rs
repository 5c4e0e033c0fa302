//! Suggestion handlers - intake and submitter-facing reads.

mod create_suggestion;
mod get_suggestion;
mod list_own_suggestions;

pub use create_suggestion::{
    CreateSuggestionCommand, CreateSuggestionError, CreateSuggestionHandler,
    CreateSuggestionResult,
};
pub use get_suggestion::{
    GetSuggestionCommand, GetSuggestionError, GetSuggestionHandler, GetSuggestionResult,
};
pub use list_own_suggestions::{
    ListOwnSuggestionsCommand, ListOwnSuggestionsError, ListOwnSuggestionsHandler,
    ListOwnSuggestionsResult,
};
