//! Provider settings and document endpoints, scoped to the caller.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

use crate::api::auth::CurrentUser;
use crate::api::request::{DocumentRequest, SettingsRequest};
use crate::api::response::ApiErrorResponse;
use crate::api::state::AppState;
use crate::db::settings;
use crate::models::{Document, UserSettings};

/// `GET /settings/`
pub async fn get(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<UserSettings>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(settings::get_or_create(&conn, caller.0)?))
}

/// `PUT /settings/`
pub async fn update(
    caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<SettingsRequest>, JsonRejection>,
) -> Result<Json<UserSettings>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let updated = settings::update(&conn, caller.0, &req.into())?;
    info!(correlation_id = %correlation_id, user_id = caller.0, "Settings updated");
    Ok(Json(updated))
}

/// `GET /settings/documents/`
pub async fn list_documents(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiErrorResponse> {
    let conn = state.db();
    let owner = settings::get_or_create(&conn, caller.0)?;
    Ok(Json(settings::list_documents(&conn, owner.id)?))
}

/// `POST /settings/documents/`
pub async fn create_document(
    caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let owner = settings::get_or_create(&conn, caller.0)?;
    let document = settings::insert_document(
        &conn,
        owner.id,
        &req.name,
        req.effective_start,
        req.effective_end,
    )?;

    info!(
        correlation_id = %correlation_id,
        user_id = caller.0,
        document_id = document.id,
        "Document added"
    );
    Ok((StatusCode::CREATED, Json(document)))
}

/// `DELETE /settings/documents/{id}/`
pub async fn remove_document(
    caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let conn = state.db();
    let owner = settings::get_or_create(&conn, caller.0)?;
    settings::delete_document(&conn, owner.id, id)?;
    info!(correlation_id = %correlation_id, user_id = caller.0, document_id = id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}
