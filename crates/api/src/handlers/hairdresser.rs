use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use cutandgo_core::{
    errors::BookingError,
    models::{
        admin::AdminRole,
        hairdresser::{CreateHairdresserRequest, Hairdresser, HairdresserQuery, UpdateHairdresserRequest},
    },
};
use cutandgo_db::repositories::hairdresser::HairdresserInput;
use std::sync::Arc;
use uuid::Uuid;

use super::{admin::require_role, not_found};
use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Lists salons, optionally filtered by a case-insensitive name fragment.
#[axum::debug_handler]
pub async fn list_hairdressers(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<HairdresserQuery>,
) -> Result<Json<Vec<Hairdresser>>, AppError> {
    let db_hairdressers = match query.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            cutandgo_db::repositories::hairdresser::get_hairdressers_by_name(&state.db_pool, name).await?
        }
        _ => cutandgo_db::repositories::hairdresser::get_hairdressers(&state.db_pool).await?,
    };

    Ok(Json(db_hairdressers.into_iter().map(Hairdresser::from).collect()))
}

#[axum::debug_handler]
pub async fn get_hairdresser(
    State(state): State<Arc<ApiState>>,
    Path(hairdresser_id): Path<Uuid>,
) -> Result<Json<Hairdresser>, AppError> {
    let db_hairdresser = cutandgo_db::repositories::hairdresser::get_hairdresser_by_id(&state.db_pool, hairdresser_id)
        .await?
        .ok_or_else(|| not_found("Hairdresser", hairdresser_id))?;

    Ok(Json(Hairdresser::from(db_hairdresser)))
}

/// Creates a salon owned by the caller.
#[axum::debug_handler]
pub async fn create_hairdresser(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateHairdresserRequest>,
) -> Result<(StatusCode, Json<Hairdresser>), AppError> {
    check_name(&payload.name)?;

    let input = HairdresserInput {
        name: &payload.name,
        phone: &payload.phone,
        address: &payload.address,
        postal_code: payload.postal_code,
        image_extension: payload.image_extension.as_deref(),
    };

    let db_hairdresser =
        cutandgo_db::repositories::hairdresser::create_hairdresser(&state.db_pool, auth.user_id, &input).await?;
    tracing::info!("Hairdresser {} created by user {}", db_hairdresser.id, auth.user_id);

    Ok((StatusCode::CREATED, Json(Hairdresser::from(db_hairdresser))))
}

#[axum::debug_handler]
pub async fn update_hairdresser(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(hairdresser_id): Path<Uuid>,
    Json(payload): Json<UpdateHairdresserRequest>,
) -> Result<Json<Hairdresser>, AppError> {
    check_name(&payload.name)?;
    require_role(&state.db_pool, hairdresser_id, &auth, AdminRole::Manager).await?;

    let input = HairdresserInput {
        name: &payload.name,
        phone: &payload.phone,
        address: &payload.address,
        postal_code: payload.postal_code,
        image_extension: payload.image_extension.as_deref(),
    };

    let db_hairdresser =
        cutandgo_db::repositories::hairdresser::update_hairdresser(&state.db_pool, hairdresser_id, &input)
            .await?
            .ok_or_else(|| not_found("Hairdresser", hairdresser_id))?;

    Ok(Json(Hairdresser::from(db_hairdresser)))
}

/// Only the owner may delete a salon.
#[axum::debug_handler]
pub async fn delete_hairdresser(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(hairdresser_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_role(&state.db_pool, hairdresser_id, &auth, AdminRole::Owner).await?;

    cutandgo_db::repositories::hairdresser::delete_hairdresser(&state.db_pool, hairdresser_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn get_hairdresser_emails(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(hairdresser_id): Path<Uuid>,
) -> Result<Json<Vec<String>>, AppError> {
    require_role(&state.db_pool, hairdresser_id, &auth, AdminRole::Employee).await?;

    let emails =
        cutandgo_db::repositories::hairdresser::get_hairdresser_emails(&state.db_pool, hairdresser_id).await?;

    Ok(Json(emails))
}

fn check_name(name: &str) -> Result<(), BookingError> {
    if name.trim().is_empty() {
        return Err(BookingError::Validation("Hairdresser name must not be empty".to_string()));
    }
    Ok(())
}
