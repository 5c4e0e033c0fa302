//! Review handlers - the admin-facing decision surface.

mod archive_suggestion;
mod decide_suggestion;
mod edit_suggestion;
mod list_suggestions;

pub use archive_suggestion::{
    ArchiveSuggestionCommand, ArchiveSuggestionError, ArchiveSuggestionHandler,
    ArchiveSuggestionResult,
};
pub use decide_suggestion::{
    DecideSuggestionCommand, DecideSuggestionError, DecideSuggestionHandler,
    DecideSuggestionResult,
};
pub use edit_suggestion::{
    EditSuggestionCommand, EditSuggestionError, EditSuggestionHandler, EditSuggestionResult,
};
pub use list_suggestions::{
    ListSuggestionsCommand, ListSuggestionsError, ListSuggestionsHandler, ListSuggestionsResult,
};
