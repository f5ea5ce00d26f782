//! HTTP request handlers, grouped by resource.

pub mod attendance;
pub mod clients;
pub mod goals;
pub mod settings;
pub mod timeclock;
pub mod users;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};
use tracing::warn;
use uuid::Uuid;

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // User management
        .route("/api/users/", get(users::list).post(users::create))
        .route(
            "/api/users/:id/",
            get(users::get).put(users::update).delete(users::remove),
        )
        // Client registry
        .route("/api/clients/", get(clients::list).post(clients::create))
        .route(
            "/api/clients/:id/",
            get(clients::get).put(clients::update).delete(clients::remove),
        )
        // Attendance
        .route(
            "/api/attendance/",
            get(attendance::list).post(attendance::create),
        )
        .route("/api/attendance/today/", get(attendance::today))
        .route("/api/attendance/date/:date/", get(attendance::by_date))
        .route(
            "/api/attendance/:id/",
            get(attendance::get)
                .put(attendance::update)
                .delete(attendance::remove),
        )
        // Goals, progress notes, trials
        .route("/api/goals/", get(goals::list_goals).post(goals::create_goal))
        .route(
            "/api/goals/:id/",
            get(goals::get_goal)
                .put(goals::update_goal)
                .delete(goals::remove_goal),
        )
        .route(
            "/api/progress/",
            get(goals::list_progress).post(goals::create_progress),
        )
        .route(
            "/api/progress/:id/",
            get(goals::get_progress)
                .put(goals::update_progress)
                .delete(goals::remove_progress),
        )
        .route(
            "/api/trials/",
            get(goals::list_trials).post(goals::create_trial),
        )
        .route(
            "/api/trials/:id/",
            get(goals::get_trial)
                .put(goals::update_trial)
                .delete(goals::remove_trial),
        )
        // Time clock
        .route("/checkin/", post(timeclock::check_in))
        .route("/checkout/", post(timeclock::check_out))
        .route("/pause/", post(timeclock::pause))
        .route("/resume/", post(timeclock::resume))
        .route("/history/", get(timeclock::history))
        .route("/today/", get(timeclock::today))
        .route("/summary/", get(timeclock::summary))
        // Payroll profile & provider settings
        .route(
            "/api/work-profile/",
            get(timeclock::get_profile).put(timeclock::update_profile),
        )
        .route(
            "/settings/",
            get(settings::get).put(settings::update),
        )
        .route(
            "/settings/documents/",
            get(settings::list_documents).post(settings::create_document),
        )
        .route("/settings/documents/:id/", axum::routing::delete(settings::remove_document))
        .with_state(state)
}

/// Unwraps a JSON body extraction, mapping rejections to the error taxonomy.
pub(super) fn parse_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse {
                status: axum::http::StatusCode::BAD_REQUEST,
                error,
            })
        }
    }
}
