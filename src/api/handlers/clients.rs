//! Client registry endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api::auth::CurrentUser;
use crate::api::request::ClientRequest;
use crate::api::response::{ApiError, ApiErrorResponse};
use crate::api::state::AppState;
use crate::db::clients;
use crate::models::{Client, ClientStatus};

/// Query string for `GET /api/clients/`.
#[derive(Debug, Deserialize)]
pub struct ClientListQuery {
    status: Option<String>,
}

/// `GET /api/clients/`
pub async fn list(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> Result<Json<Vec<Client>>, ApiErrorResponse> {
    let status = match query.status.as_deref() {
        None => None,
        Some(s) => Some(ClientStatus::parse(s).ok_or_else(|| ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(format!("Unknown client status: {}", s)),
        })?),
    };

    let conn = state.db();
    Ok(Json(clients::list(&conn, status)?))
}

/// `POST /api/clients/`
pub async fn create(
    _caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Client>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let client = clients::insert(&conn, &req.into())?;
    info!(correlation_id = %correlation_id, client_id = client.id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// `GET /api/clients/{id}/`
pub async fn get(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Client>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(clients::get(&conn, id)?))
}

/// `PUT /api/clients/{id}/`
pub async fn update(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> Result<Json<Client>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let client = clients::update(&conn, id, &req.into())?;
    info!(correlation_id = %correlation_id, client_id = id, "Client updated");
    Ok(Json(client))
}

/// `DELETE /api/clients/{id}/`
pub async fn remove(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let conn = state.db();
    clients::delete(&conn, id)?;
    info!(correlation_id = %correlation_id, client_id = id, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}
