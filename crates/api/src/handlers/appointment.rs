use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use cutandgo_core::models::appointment::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};
use std::sync::Arc;
use uuid::Uuid;

use super::not_found;
use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Books an appointment for the caller. It starts unconfirmed.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    auth.ensure_is(payload.user_id)?;

    let db_appointment = cutandgo_db::repositories::appointment::create_appointment(
        &state.db_pool,
        payload.user_id,
        payload.hairdresser_id,
        payload.date,
        payload.time,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(Appointment::try_from(db_appointment)?)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let db_appointment = cutandgo_db::repositories::appointment::get_appointment_by_id(&state.db_pool, appointment_id)
        .await?
        .ok_or_else(|| not_found("Appointment", appointment_id))?;

    Ok(Json(Appointment::try_from(db_appointment)?))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let db_appointment = cutandgo_db::repositories::appointment::update_appointment(
        &state.db_pool,
        appointment_id,
        payload.date,
        payload.time,
        payload.status,
    )
    .await?
    .ok_or_else(|| not_found("Appointment", appointment_id))?;

    Ok(Json(Appointment::try_from(db_appointment)?))
}

#[axum::debug_handler]
pub async fn approve_appointment(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let db_appointment = cutandgo_db::repositories::appointment::approve_appointment(&state.db_pool, appointment_id)
        .await?
        .ok_or_else(|| not_found("Appointment", appointment_id))?;

    Ok(Json(Appointment::try_from(db_appointment)?))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = cutandgo_db::repositories::appointment::delete_appointment(&state.db_pool, appointment_id).await?;
    if !deleted {
        return Err(not_found("Appointment", appointment_id).into());
    }

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_hairdresser_appointments(
    State(state): State<Arc<ApiState>>,
    Path(hairdresser_id): Path<Uuid>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments =
        cutandgo_db::repositories::appointment::get_appointments_by_hairdresser(&state.db_pool, hairdresser_id)
            .await?
            .into_iter()
            .map(Appointment::try_from)
            .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(appointments))
}
