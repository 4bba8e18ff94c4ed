use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cutandgo_core::{errors::BookingError, models::appointment_service::AppointmentService};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

fn link_not_found(appointment_id: Uuid, service_id: Uuid) -> BookingError {
    BookingError::NotFound(format!(
        "Service {} is not linked to appointment {}",
        service_id, appointment_id
    ))
}

#[axum::debug_handler]
pub async fn get_link(
    State(state): State<Arc<ApiState>>,
    Path((appointment_id, service_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<AppointmentService>, AppError> {
    let link = cutandgo_db::repositories::appointment_service::get_appointment_service(
        &state.db_pool,
        appointment_id,
        service_id,
    )
    .await?
    .ok_or_else(|| link_not_found(appointment_id, service_id))?;

    Ok(Json(AppointmentService::from(link)))
}

#[axum::debug_handler]
pub async fn create_link(
    State(state): State<Arc<ApiState>>,
    Path((appointment_id, service_id)): Path<(Uuid, Uuid)>,
) -> Result<(StatusCode, Json<AppointmentService>), AppError> {
    let link = cutandgo_db::repositories::appointment_service::create_appointment_service(
        &state.db_pool,
        appointment_id,
        service_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(AppointmentService::from(link))))
}

#[axum::debug_handler]
pub async fn delete_link(
    State(state): State<Arc<ApiState>>,
    Path((appointment_id, service_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let deleted = cutandgo_db::repositories::appointment_service::delete_appointment_service(
        &state.db_pool,
        appointment_id,
        service_id,
    )
    .await?;
    if !deleted {
        return Err(link_not_found(appointment_id, service_id).into());
    }

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_service_ids(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Vec<Uuid>>, AppError> {
    let ids = cutandgo_db::repositories::appointment_service::get_service_ids(&state.db_pool, appointment_id).await?;

    Ok(Json(ids))
}

#[axum::debug_handler]
pub async fn list_links(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Vec<AppointmentService>>, AppError> {
    let links =
        cutandgo_db::repositories::appointment_service::get_appointment_services(&state.db_pool, appointment_id)
            .await?
            .into_iter()
            .map(AppointmentService::from)
            .collect();

    Ok(Json(links))
}
