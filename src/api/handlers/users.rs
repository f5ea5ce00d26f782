//! User management endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::api::auth::CurrentUser;
use crate::api::request::{UserCreateRequest, UserUpdateRequest};
use crate::api::response::ApiErrorResponse;
use crate::api::state::AppState;
use crate::db::users;
use crate::models::User;

/// `GET /api/users/`
pub async fn list(
    _caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(users::list(&conn)?))
}

/// `POST /api/users/`
pub async fn create(
    _caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<UserCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let user = users::insert(&conn, &req.name, &req.email, req.is_staff, Utc::now())?;
    info!(correlation_id = %correlation_id, user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /api/users/{id}/`
pub async fn get(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(users::get(&conn, id)?))
}

/// `PUT /api/users/{id}/`
pub async fn update(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UserUpdateRequest>, JsonRejection>,
) -> Result<Json<User>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let user = users::update(&conn, id, &req.name, &req.email, req.is_staff, req.is_active)?;
    info!(correlation_id = %correlation_id, user_id = id, "User updated");
    Ok(Json(user))
}

/// `DELETE /api/users/{id}/`
pub async fn remove(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let conn = state.db();
    users::delete(&conn, id)?;
    info!(correlation_id = %correlation_id, user_id = id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
