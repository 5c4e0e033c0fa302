//! Caller identity extraction.
//!
//! Authentication itself is delegated to the identity-aware proxy in front
//! of this service; by the time a request arrives, the authenticated user
//! id is carried in the `x-user-id` header. Requests without it are
//! rejected before reaching any handler logic.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::UserId;

use super::dto::ErrorResponse;

/// Header set by the fronting proxy after authentication.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated caller.
pub struct RequireUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        match UserId::new(header) {
            Ok(user_id) => Ok(RequireUser(user_id)),
            Err(_) => Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing or invalid user identity")),
            )
                .into_response()),
        }
    }
}
