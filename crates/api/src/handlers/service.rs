use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use cutandgo_core::{
    errors::BookingError,
    models::service::{CreateServiceRequest, Service, ServiceIdsQuery, UpdateServiceRequest},
};
use std::sync::Arc;
use uuid::Uuid;

use super::not_found;
use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    payload.check().map_err(BookingError::Validation)?;

    let db_service = cutandgo_db::repositories::service::create_service(
        &state.db_pool,
        payload.hairdresser_id,
        payload.name.trim(),
        payload.price_cents,
        payload.duration_minutes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(Service::from(db_service))))
}

/// `GET /api/services?ids=<uuid>,<uuid>`
#[axum::debug_handler]
pub async fn list_services_by_ids(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ServiceIdsQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let ids = query.parse_ids().map_err(BookingError::Validation)?;
    if ids.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let services = cutandgo_db::repositories::service::get_services_by_ids(&state.db_pool, &ids)
        .await?
        .into_iter()
        .map(Service::from)
        .collect();

    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(service_id): Path<Uuid>,
) -> Result<Json<Service>, AppError> {
    let db_service = cutandgo_db::repositories::service::get_service_by_id(&state.db_pool, service_id)
        .await?
        .ok_or_else(|| not_found("Service", service_id))?;

    Ok(Json(Service::from(db_service)))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    Path(service_id): Path<Uuid>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    payload.check().map_err(BookingError::Validation)?;

    let db_service = cutandgo_db::repositories::service::update_service(
        &state.db_pool,
        service_id,
        payload.name.trim(),
        payload.price_cents,
        payload.duration_minutes,
    )
    .await?
    .ok_or_else(|| not_found("Service", service_id))?;

    Ok(Json(Service::from(db_service)))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    Path(service_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = cutandgo_db::repositories::service::delete_service(&state.db_pool, service_id).await?;
    if !deleted {
        return Err(not_found("Service", service_id).into());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Public list of what a salon offers.
#[axum::debug_handler]
pub async fn list_hairdresser_services(
    State(state): State<Arc<ApiState>>,
    Path(hairdresser_id): Path<Uuid>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = cutandgo_db::repositories::service::get_services_by_hairdresser(&state.db_pool, hairdresser_id)
        .await?
        .into_iter()
        .map(Service::from)
        .collect();

    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn list_appointment_services(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = cutandgo_db::repositories::service::get_services_by_appointment(&state.db_pool, appointment_id)
        .await?
        .into_iter()
        .map(Service::from)
        .collect();

    Ok(Json(services))
}
