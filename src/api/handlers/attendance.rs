//! Attendance endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api::auth::CurrentUser;
use crate::api::request::AttendanceRequest;
use crate::api::response::{ApiError, ApiErrorResponse};
use crate::api::state::AppState;
use crate::clock::phoenix_today;
use crate::db::attendance::{self, AttendanceFilter};
use crate::models::{AttendanceRecord, ServiceCode, ServiceLocation};

/// Query string for `GET /api/attendance/`.
#[derive(Debug, Deserialize)]
pub struct AttendanceListQuery {
    date: Option<String>,
    client: Option<String>,
    service: Option<String>,
    location: Option<String>,
}

fn bad_request(message: String) -> ApiErrorResponse {
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error: ApiError::validation_error(message),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ApiErrorResponse> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| bad_request(format!("Invalid date: {}", s)))
}

fn validate_times(req: &AttendanceRequest) -> Result<(), ApiErrorResponse> {
    if req.time_out <= req.time_in {
        return Err(bad_request("time_out must be after time_in".to_string()));
    }
    Ok(())
}

/// `GET /api/attendance/`
pub async fn list(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<AttendanceListQuery>,
) -> Result<Json<Vec<AttendanceRecord>>, ApiErrorResponse> {
    let filter = AttendanceFilter {
        date: query.date.as_deref().map(parse_date).transpose()?,
        client: query.client,
        service: query
            .service
            .as_deref()
            .map(|s| {
                ServiceCode::parse(s).ok_or_else(|| bad_request(format!("Unknown service: {}", s)))
            })
            .transpose()?,
        location: query
            .location
            .as_deref()
            .map(|s| {
                ServiceLocation::parse(s)
                    .ok_or_else(|| bad_request(format!("Unknown location: {}", s)))
            })
            .transpose()?,
    };

    let conn = state.db();
    Ok(Json(attendance::list(&conn, &filter)?))
}

/// `GET /api/attendance/today/`
pub async fn today(
    _caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceRecord>>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(attendance::list_by_date(&conn, phoenix_today())?))
}

/// `GET /api/attendance/date/{iso-date}/`
pub async fn by_date(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<AttendanceRecord>>, ApiErrorResponse> {
    let date = parse_date(&date)?;
    let conn = state.db();
    Ok(Json(attendance::list_by_date(&conn, date)?))
}

/// `POST /api/attendance/`
pub async fn create(
    _caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AttendanceRecord>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;
    validate_times(&req)?;

    let conn = state.db();
    let record = attendance::insert(&conn, &req.into(), Utc::now())?;
    info!(
        correlation_id = %correlation_id,
        record_id = record.id,
        client = %record.client,
        "Attendance record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/attendance/{id}/`
pub async fn get(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AttendanceRecord>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(attendance::get(&conn, id)?))
}

/// `PUT /api/attendance/{id}/`
pub async fn update(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> Result<Json<AttendanceRecord>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;
    validate_times(&req)?;

    let conn = state.db();
    let record = attendance::update(&conn, id, &req.into(), Utc::now())?;
    info!(correlation_id = %correlation_id, record_id = id, "Attendance record updated");
    Ok(Json(record))
}

/// `DELETE /api/attendance/{id}/`
pub async fn remove(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let conn = state.db();
    attendance::delete(&conn, id)?;
    info!(correlation_id = %correlation_id, record_id = id, "Attendance record deleted");
    Ok(StatusCode::NO_CONTENT)
}
