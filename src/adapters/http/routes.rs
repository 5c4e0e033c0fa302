//! HTTP routes for the suggestion and review API.

use std::time::Duration;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{
    archive_suggestion, complete_chat, create_suggestion, decide_suggestion, edit_suggestion,
    export_prd, get_suggestion, list_own_suggestions, list_review_queue, regenerate_prd,
    start_chat, submit_chat_turn, upload_attachment, AppHandlers,
};

/// Request timeout for the whole API surface. AI-backed endpoints wait for
/// the provider, so this sits above the provider's own timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Creates the application router with all endpoints.
pub fn api_routes(handlers: AppHandlers) -> Router {
    Router::new()
        // Submitter surface
        .route("/api/suggestions", post(create_suggestion).get(list_own_suggestions))
        .route("/api/suggestions/:id", get(get_suggestion))
        .route("/api/suggestions/:id/chat/start", post(start_chat))
        .route("/api/suggestions/:id/chat/messages", post(submit_chat_turn))
        .route("/api/suggestions/:id/chat/complete", post(complete_chat))
        .route("/api/attachments", post(upload_attachment))
        // Admin surface
        .route("/api/admin/suggestions", get(list_review_queue))
        .route("/api/admin/suggestions/:id", put(edit_suggestion))
        .route("/api/admin/suggestions/:id/decision", post(decide_suggestion))
        .route("/api/admin/suggestions/:id/archive", post(archive_suggestion))
        .route("/api/admin/suggestions/:id/prd", post(regenerate_prd))
        .route("/api/admin/suggestions/:id/prd/export", get(export_prd))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(handlers)
}
