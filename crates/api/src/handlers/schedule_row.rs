//! # Schedule Row Handlers
//!
//! Rows are the weekly recurring opening intervals of a schedule. Every
//! write goes through the conflict validator inside the repository
//! transaction, so these handlers only translate payloads and outcomes:
//!
//! - an inverted or empty range answers `400` with `INCORRECT_RANGE`
//! - an identical row answers `409` with `DUPLICATE`
//! - an overlap on a shared weekday answers `409` with `OVERWRITE_RANGE`
//!
//! `POST /api/schedules/:schedule_id/rows/validate` runs the same checks
//! without writing and reports the outcome in the body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cutandgo_core::models::schedule_row::{
    CreateScheduleRowRequest, ScheduleRow, ScheduleRowResponse, UpdateScheduleRowRequest,
    ValidateScheduleRowResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use super::not_found;
use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_schedule_rows(
    State(state): State<Arc<ApiState>>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleRowResponse>>, AppError> {
    cutandgo_db::repositories::schedule::get_schedule_by_id(&state.db_pool, schedule_id)
        .await?
        .ok_or_else(|| not_found("Schedule", schedule_id))?;

    let rows = cutandgo_db::repositories::schedule_row::get_schedule_rows_by_schedule_id(&state.db_pool, schedule_id)
        .await?
        .into_iter()
        .map(ScheduleRowResponse::from)
        .collect();

    Ok(Json(rows))
}

#[axum::debug_handler]
pub async fn create_schedule_row(
    State(state): State<Arc<ApiState>>,
    Path(schedule_id): Path<Uuid>,
    Json(payload): Json<CreateScheduleRowRequest>,
) -> Result<(StatusCode, Json<ScheduleRowResponse>), AppError> {
    let db_row = cutandgo_db::repositories::schedule_row::create_schedule_row(
        &state.db_pool,
        schedule_id,
        payload.start,
        payload.end,
        payload.days,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ScheduleRowResponse::from(db_row))))
}

/// Dry run of [`create_schedule_row`].
#[axum::debug_handler]
pub async fn validate_schedule_row(
    State(state): State<Arc<ApiState>>,
    Path(schedule_id): Path<Uuid>,
    Json(payload): Json<CreateScheduleRowRequest>,
) -> Result<Json<ValidateScheduleRowResponse>, AppError> {
    cutandgo_db::repositories::schedule::get_schedule_by_id(&state.db_pool, schedule_id)
        .await?
        .ok_or_else(|| not_found("Schedule", schedule_id))?;

    let candidate = ScheduleRow::new(schedule_id, payload.start, payload.end, payload.days);
    let outcome = cutandgo_db::repositories::schedule_row::check_schedule_row(&state.db_pool, &candidate).await?;

    Ok(Json(ValidateScheduleRowResponse::from(outcome)))
}

#[axum::debug_handler]
pub async fn get_schedule_row(
    State(state): State<Arc<ApiState>>,
    Path(row_id): Path<Uuid>,
) -> Result<Json<ScheduleRowResponse>, AppError> {
    let db_row = cutandgo_db::repositories::schedule_row::get_schedule_row_by_id(&state.db_pool, row_id)
        .await?
        .ok_or_else(|| not_found("Schedule row", row_id))?;

    Ok(Json(ScheduleRowResponse::from(db_row)))
}

#[axum::debug_handler]
pub async fn update_schedule_row(
    State(state): State<Arc<ApiState>>,
    Path(row_id): Path<Uuid>,
    Json(payload): Json<UpdateScheduleRowRequest>,
) -> Result<Json<ScheduleRowResponse>, AppError> {
    let db_row = cutandgo_db::repositories::schedule_row::update_schedule_row(
        &state.db_pool,
        row_id,
        payload.start,
        payload.end,
        payload.days,
    )
    .await?;

    Ok(Json(ScheduleRowResponse::from(db_row)))
}

#[axum::debug_handler]
pub async fn delete_schedule_row(
    State(state): State<Arc<ApiState>>,
    Path(row_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = cutandgo_db::repositories::schedule_row::delete_schedule_row(&state.db_pool, row_id).await?;
    if !deleted {
        return Err(not_found("Schedule row", row_id).into());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Rows of the salon's active schedule. Public, used to show opening hours.
#[axum::debug_handler]
pub async fn get_active_schedule_rows(
    State(state): State<Arc<ApiState>>,
    Path(hairdresser_id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleRowResponse>>, AppError> {
    let rows = cutandgo_db::repositories::schedule_row::get_active_schedule_rows(&state.db_pool, hairdresser_id)
        .await?
        .into_iter()
        .map(ScheduleRowResponse::from)
        .collect();

    Ok(Json(rows))
}
