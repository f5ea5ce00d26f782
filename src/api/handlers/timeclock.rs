//! Time-clock and payroll-profile endpoints, all scoped to the caller.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::auth::CurrentUser;
use crate::api::request::{PauseRequest, WorkProfileRequest};
use crate::api::response::{ApiError, ApiErrorResponse};
use crate::api::state::AppState;
use crate::clock::{compute_worked_hours, phoenix_today};
use crate::db::timeclock::{self, WorkSummary};
use crate::error::OfficeError;
use crate::models::{PauseRecord, TimeRecord, WorkProfile};

fn not_checked_in() -> ApiErrorResponse {
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error: ApiError::new("NOT_CHECKED_IN", "You have not checked in today"),
    }
}

/// `POST /checkin/`
pub async fn check_in(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<TimeRecord>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let today = phoenix_today();

    let conn = state.db();
    let record = timeclock::check_in(&conn, caller.0, today, Utc::now()).map_err(|e| match e {
        OfficeError::Duplicate { .. } => {
            warn!(correlation_id = %correlation_id, user_id = caller.0, "Duplicate check-in");
            ApiErrorResponse::bad_request("ALREADY_CHECKED_IN", "You have already checked in today")
        }
        other => other.into(),
    })?;

    info!(
        correlation_id = %correlation_id,
        user_id = caller.0,
        record_id = record.id,
        "Checked in"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// `POST /checkout/`
///
/// Resolves any still-active pause at the checkout instant, then computes
/// worked hours from the resolved pauses overlapping the work window and
/// snapshots the payroll profile onto the record.
pub async fn check_out(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<TimeRecord>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let today = phoenix_today();
    let now = Utc::now();

    let conn = state.db();
    let record = timeclock::get_open_for_date(&conn, caller.0, today)?.ok_or_else(not_checked_in)?;

    if let Some(pause) = timeclock::active_pause(&conn, caller.0)? {
        let duration = (now - pause.pause_time).num_seconds().max(0);
        timeclock::resolve_pause(&conn, pause.id, now, duration)?;
        info!(
            correlation_id = %correlation_id,
            user_id = caller.0,
            pause_id = pause.id,
            "Open pause resolved at checkout"
        );
    }

    let spans = timeclock::pause_spans_overlapping(&conn, caller.0, record.check_in, now)?;
    let hours = compute_worked_hours(record.check_in, now, &spans);

    let profile = timeclock::get_profile(&conn, caller.0)?;
    let closed = timeclock::close(
        &conn,
        record.id,
        now,
        hours.hours_worked,
        hours.paused_hours,
        profile.rate_per_hour,
        profile.biweekly_total_hours,
    )?;

    info!(
        correlation_id = %correlation_id,
        user_id = caller.0,
        record_id = closed.id,
        hours_worked = %hours.hours_worked,
        paused_hours = %hours.paused_hours,
        "Checked out"
    );
    Ok(Json(closed))
}

/// `POST /pause/`
pub async fn pause(
    caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<PauseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PauseRecord>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;
    let today = phoenix_today();

    let conn = state.db();
    timeclock::get_open_for_date(&conn, caller.0, today)?.ok_or_else(not_checked_in)?;

    let record = timeclock::open_pause(&conn, caller.0, &req.reason, Utc::now())?;
    timeclock::set_paused(&conn, caller.0, today, true)?;

    info!(
        correlation_id = %correlation_id,
        user_id = caller.0,
        pause_id = record.id,
        reason = %record.reason,
        "Pause started"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// `POST /resume/`
pub async fn resume(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<PauseRecord>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let now = Utc::now();

    let conn = state.db();
    let pause = timeclock::active_pause(&conn, caller.0)?.ok_or(OfficeError::NoActivePause)?;

    let duration = (now - pause.pause_time).num_seconds().max(0);
    let resolved = timeclock::resolve_pause(&conn, pause.id, now, duration)?;
    timeclock::set_paused(&conn, caller.0, phoenix_today(), false)?;

    info!(
        correlation_id = %correlation_id,
        user_id = caller.0,
        pause_id = resolved.id,
        duration_seconds = duration,
        "Pause resumed"
    );
    Ok(Json(resolved))
}

/// `GET /history/`
pub async fn history(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<TimeRecord>>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(timeclock::history(&conn, caller.0)?))
}

/// `GET /today/`
///
/// Unlike the id lookups this never 404s; an absent record is reported
/// with a 200 status body.
pub async fn today(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Response, ApiErrorResponse> {
    let conn = state.db();
    match timeclock::get_for_date(&conn, caller.0, phoenix_today())? {
        Some(record) => Ok(Json(record).into_response()),
        None => Ok(Json(json!({ "status": "Not checked in today" })).into_response()),
    }
}

/// `GET /summary/`
pub async fn summary(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<WorkSummary>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(timeclock::summary(&conn, caller.0)?))
}

/// `GET /api/work-profile/`
pub async fn get_profile(
    caller: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<WorkProfile>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(timeclock::get_profile(&conn, caller.0)?))
}

/// `PUT /api/work-profile/`
///
/// Rewrites the payroll snapshot on the caller's existing time records so
/// past entries reflect the new rates.
pub async fn update_profile(
    caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<WorkProfileRequest>, JsonRejection>,
) -> Result<Json<WorkProfile>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let profile = timeclock::update_profile(
        &conn,
        &WorkProfile {
            user_id: caller.0,
            rate_per_hour: req.rate_per_hour,
            biweekly_total_hours: req.biweekly_total_hours,
        },
    )?;
    let touched = timeclock::propagate_profile(
        &conn,
        caller.0,
        profile.rate_per_hour,
        profile.biweekly_total_hours,
    )?;

    info!(
        correlation_id = %correlation_id,
        user_id = caller.0,
        records_updated = touched,
        "Work profile updated"
    );
    Ok(Json(profile))
}
