//! Goal, progress-note, and trial endpoints.

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
use crate::api::request::{GoalRequest, ProgressRequest, TrialRequest};
use crate::api::response::{ApiError, ApiErrorResponse};
use crate::api::state::AppState;
use crate::db::goals;
use crate::models::{DailyProgress, Goal, Trial};

/// Query string for `GET /api/goals/`.
#[derive(Debug, Deserialize)]
pub struct GoalListQuery {
    client_id: Option<i64>,
}

/// Query string for `GET /api/progress/`.
#[derive(Debug, Deserialize)]
pub struct ProgressListQuery {
    client_id: Option<i64>,
    date: Option<String>,
}

/// Query string for `GET /api/trials/`.
#[derive(Debug, Deserialize)]
pub struct TrialListQuery {
    daily_progress_id: Option<i64>,
}

fn parse_date(s: &str) -> Result<NaiveDate, ApiErrorResponse> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error: ApiError::validation_error(format!("Invalid date: {}", s)),
    })
}

// --- goals -----------------------------------------------------------------

/// `GET /api/goals/`
pub async fn list_goals(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<GoalListQuery>,
) -> Result<Json<Vec<Goal>>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(goals::list_goals(&conn, query.client_id)?))
}

/// `POST /api/goals/`
pub async fn create_goal(
    _caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<GoalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Goal>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let goal = goals::insert_goal(&conn, &req.into(), Utc::now())?;
    info!(correlation_id = %correlation_id, goal_id = goal.id, "Goal created");
    Ok((StatusCode::CREATED, Json(goal)))
}

/// `GET /api/goals/{id}/`
pub async fn get_goal(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Goal>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(goals::get_goal(&conn, id)?))
}

/// `PUT /api/goals/{id}/`
pub async fn update_goal(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<GoalRequest>, JsonRejection>,
) -> Result<Json<Goal>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let goal = goals::update_goal(&conn, id, &req.into(), Utc::now())?;
    info!(correlation_id = %correlation_id, goal_id = id, "Goal updated");
    Ok(Json(goal))
}

/// `DELETE /api/goals/{id}/`
pub async fn remove_goal(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiErrorResponse> {
    let conn = state.db();
    goals::delete_goal(&conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- progress notes --------------------------------------------------------

/// `GET /api/progress/`
pub async fn list_progress(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ProgressListQuery>,
) -> Result<Json<Vec<DailyProgress>>, ApiErrorResponse> {
    let date = query.date.as_deref().map(parse_date).transpose()?;
    let conn = state.db();
    Ok(Json(goals::list_progress(&conn, query.client_id, date)?))
}

/// `POST /api/progress/`
///
/// `created_by` is stamped with the calling user.
pub async fn create_progress(
    caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DailyProgress>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let progress = goals::insert_progress(&conn, &req.into(), caller.0, Utc::now())?;
    info!(
        correlation_id = %correlation_id,
        progress_id = progress.id,
        user_id = caller.0,
        "Progress note created"
    );
    Ok((StatusCode::CREATED, Json(progress)))
}

/// `GET /api/progress/{id}/`
pub async fn get_progress(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DailyProgress>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(goals::get_progress(&conn, id)?))
}

/// `PUT /api/progress/{id}/`
pub async fn update_progress(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<Json<DailyProgress>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let progress = goals::update_progress(&conn, id, &req.into())?;
    info!(correlation_id = %correlation_id, progress_id = id, "Progress note updated");
    Ok(Json(progress))
}

/// `DELETE /api/progress/{id}/`
pub async fn remove_progress(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiErrorResponse> {
    let conn = state.db();
    goals::delete_progress(&conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- trials ----------------------------------------------------------------

/// `GET /api/trials/`
pub async fn list_trials(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<TrialListQuery>,
) -> Result<Json<Vec<Trial>>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(goals::list_trials(&conn, query.daily_progress_id)?))
}

/// `POST /api/trials/`
pub async fn create_trial(
    _caller: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<TrialRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Trial>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let trial = goals::insert_trial(&conn, &req.into(), Utc::now())?;
    info!(correlation_id = %correlation_id, trial_id = trial.id, "Trial created");
    Ok((StatusCode::CREATED, Json(trial)))
}

/// `GET /api/trials/{id}/`
pub async fn get_trial(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Trial>, ApiErrorResponse> {
    let conn = state.db();
    Ok(Json(goals::get_trial(&conn, id)?))
}

/// `PUT /api/trials/{id}/`
pub async fn update_trial(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<TrialRequest>, JsonRejection>,
) -> Result<Json<Trial>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let req = super::parse_json(correlation_id, payload)?;

    let conn = state.db();
    let trial = goals::update_trial(&conn, id, &req.into())?;
    info!(correlation_id = %correlation_id, trial_id = id, "Trial updated");
    Ok(Json(trial))
}

/// `DELETE /api/trials/{id}/`
pub async fn remove_trial(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiErrorResponse> {
    let conn = state.db();
    goals::delete_trial(&conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}
