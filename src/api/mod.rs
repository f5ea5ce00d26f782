//! HTTP API for the office service.
//!
//! Routes, request/response types, and the shared application state.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::{CurrentUser, USER_ID_HEADER};
pub use handlers::create_router;
pub use response::ApiError;
pub use state::AppState;
