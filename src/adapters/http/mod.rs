//! HTTP adapter - the axum surface over the application handlers.
//!
//! Holds DTO mapping, identity extraction, and status-code mapping only;
//! all policy lives in the application and domain layers.

mod auth;
mod dto;
mod handlers;
mod routes;

pub use auth::{RequireUser, USER_ID_HEADER};
pub use dto::{
    AttachmentDto, ConversationResponse, CreateSuggestionRequest, DecideRequest,
    DecisionResponse, EditSuggestionRequest, ErrorResponse, ListSuggestionsQuery,
    MessageResponse, ReviewListResponse, SubmitTurnRequest, SuggestionResponse,
};
pub use handlers::AppHandlers;
pub use routes::api_routes;
