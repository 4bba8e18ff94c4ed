use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use cutandgo_core::{
    errors::BookingError,
    models::{
        appointment::Appointment,
        auth::AssignTokenRequest,
        hairdresser::Hairdresser,
        user::{CreateUserRequest, UpdateUserRequest, User},
    },
};
use cutandgo_db::repositories::user::UserInput;
use std::sync::Arc;
use uuid::Uuid;

use super::not_found;
use crate::{
    middleware::{
        auth::{self, AuthUser},
        error_handling::AppError,
    },
    ApiState,
};

/// Registers a new account. This route is public.
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.check().map_err(BookingError::Validation)?;

    let password_hash = auth::hash_password(&payload.password)?;
    let input = UserInput {
        name: &payload.name,
        last_name: &payload.last_name,
        phone: &payload.phone,
        email: &payload.email,
        image_extension: payload.image_extension.as_deref(),
    };

    let db_user = cutandgo_db::repositories::user::create_user(&state.db_pool, &input, &password_hash).await?;
    tracing::info!("User {} registered", db_user.id);

    Ok((StatusCode::CREATED, Json(User::from(db_user))))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let db_user = cutandgo_db::repositories::user::get_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| not_found("User", user_id))?;

    Ok(Json(User::from(db_user)))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    auth.ensure_is(user_id)?;

    if payload.name.trim().is_empty() || !payload.email.contains('@') {
        return Err(BookingError::Validation("Name and a valid email are required".to_string()).into());
    }

    let input = UserInput {
        name: &payload.name,
        last_name: &payload.last_name,
        phone: &payload.phone,
        email: &payload.email,
        image_extension: payload.image_extension.as_deref(),
    };

    let db_user = cutandgo_db::repositories::user::update_user(&state.db_pool, user_id, &input)
        .await?
        .ok_or_else(|| not_found("User", user_id))?;

    Ok(Json(User::from(db_user)))
}

/// Deletes the account, cascading to salons it is the last admin of.
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth.ensure_is(user_id)?;

    cutandgo_db::repositories::user::delete_user(&state.db_pool, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Confirms the e-mail address with the temp token previously assigned to
/// the user.
#[axum::debug_handler]
pub async fn confirm_email(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<AssignTokenRequest>,
) -> Result<Json<User>, AppError> {
    auth.ensure_is(user_id)?;

    let valid =
        cutandgo_db::repositories::token::validate_user_token(&state.db_pool, user_id, &payload.token).await?;
    if !valid {
        return Err(BookingError::Validation("Invalid confirmation token".to_string()).into());
    }

    let db_user = cutandgo_db::repositories::user::confirm_email(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| not_found("User", user_id))?;

    Ok(Json(User::from(db_user)))
}

#[axum::debug_handler]
pub async fn get_user_hairdressers(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Hairdresser>>, AppError> {
    let hairdressers = cutandgo_db::repositories::hairdresser::get_hairdressers_by_user(&state.db_pool, user_id)
        .await?
        .into_iter()
        .map(Hairdresser::from)
        .collect();

    Ok(Json(hairdressers))
}

#[axum::debug_handler]
pub async fn get_user_appointments(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    auth.ensure_is(user_id)?;

    let appointments = cutandgo_db::repositories::appointment::get_appointments_by_user(&state.db_pool, user_id)
        .await?
        .into_iter()
        .map(Appointment::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(appointments))
}
