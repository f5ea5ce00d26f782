//! Caller identification.
//!
//! Authentication is delegated to the fronting proxy; handlers trust the
//! `X-User-Id` header it injects.

use axum::{async_trait, extract::FromRequestParts, http::StatusCode, http::request::Parts};

use super::response::{ApiError, ApiErrorResponse};

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, extracted from `X-User-Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok());

        match user_id {
            Some(id) => Ok(CurrentUser(id)),
            None => Err(ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("AUTH_REQUIRED", "A valid X-User-Id header is required"),
            }),
        }
    }
}
