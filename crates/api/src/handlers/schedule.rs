use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use cutandgo_core::{
    errors::BookingError,
    models::{
        schedule::{CreateScheduleRequest, Schedule, ScheduleQuery, ScheduleResponse, UpdateScheduleRequest},
        schedule_row::ScheduleRowResponse,
    },
};
use cutandgo_db::models::DbSchedule;
use eyre::Result;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::not_found;
use crate::{middleware::error_handling::AppError, ApiState};

/// Converts a stored schedule to its response, loading its rows when asked.
async fn to_response(pool: &PgPool, db_schedule: DbSchedule, with_rows: bool) -> Result<ScheduleResponse> {
    let mut response = ScheduleResponse::from(Schedule::from(db_schedule));

    if with_rows {
        let rows = cutandgo_db::repositories::schedule_row::get_schedule_rows_by_schedule_id(pool, response.id)
            .await?
            .into_iter()
            .map(ScheduleRowResponse::from)
            .collect();
        response.rows = Some(rows);
    }

    Ok(response)
}

fn check_name(name: &str) -> Result<(), BookingError> {
    if name.trim().is_empty() {
        return Err(BookingError::Validation("Schedule name must not be empty".to_string()));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), AppError> {
    check_name(&payload.name)?;

    let db_schedule = cutandgo_db::repositories::schedule::create_schedule(
        &state.db_pool,
        payload.hairdresser_id,
        payload.name.trim(),
        payload.active,
    )
    .await?;

    let response = to_response(&state.db_pool, db_schedule, false).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(schedule_id): Path<Uuid>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let db_schedule = cutandgo_db::repositories::schedule::get_schedule_by_id(&state.db_pool, schedule_id)
        .await?
        .ok_or_else(|| not_found("Schedule", schedule_id))?;

    Ok(Json(to_response(&state.db_pool, db_schedule, query.rows).await?))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    Path(schedule_id): Path<Uuid>,
    Json(payload): Json<UpdateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    check_name(&payload.name)?;

    let db_schedule = cutandgo_db::repositories::schedule::update_schedule(
        &state.db_pool,
        schedule_id,
        payload.name.trim(),
        payload.active,
    )
    .await?;

    Ok(Json(to_response(&state.db_pool, db_schedule, false).await?))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    Path(schedule_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    cutandgo_db::repositories::schedule::delete_schedule(&state.db_pool, schedule_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    Path(hairdresser_id): Path<Uuid>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let db_schedules =
        cutandgo_db::repositories::schedule::get_schedules_by_hairdresser(&state.db_pool, hairdresser_id).await?;

    let mut schedules = Vec::with_capacity(db_schedules.len());
    for db_schedule in db_schedules {
        schedules.push(to_response(&state.db_pool, db_schedule, query.rows).await?);
    }

    Ok(Json(schedules))
}

#[axum::debug_handler]
pub async fn get_active_schedule(
    State(state): State<Arc<ApiState>>,
    Path(hairdresser_id): Path<Uuid>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let db_schedule = cutandgo_db::repositories::schedule::get_active_schedule(&state.db_pool, hairdresser_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Hairdresser {} has no active schedule", hairdresser_id))
        })?;

    Ok(Json(to_response(&state.db_pool, db_schedule, query.rows).await?))
}

#[axum::debug_handler]
pub async fn get_schedule_names(
    State(state): State<Arc<ApiState>>,
    Path(hairdresser_id): Path<Uuid>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = cutandgo_db::repositories::schedule::get_schedule_names(&state.db_pool, hairdresser_id).await?;

    Ok(Json(names))
}

#[axum::debug_handler]
pub async fn activate_schedule(
    State(state): State<Arc<ApiState>>,
    Path((hairdresser_id, schedule_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let db_schedule =
        cutandgo_db::repositories::schedule::activate_schedule(&state.db_pool, hairdresser_id, schedule_id).await?;
    tracing::info!("Schedule {} is now active for hairdresser {}", schedule_id, hairdresser_id);

    Ok(Json(to_response(&state.db_pool, db_schedule, false).await?))
}
