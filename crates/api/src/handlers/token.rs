use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use cutandgo_core::models::auth::{
    AssignTokenRequest, GeneratedTokenResponse, TokenQuery, TokenValidationResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use super::not_found;
use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

pub async fn generate_token() -> Json<GeneratedTokenResponse> {
    Json(GeneratedTokenResponse {
        token: cutandgo_db::repositories::token::generate_token(),
    })
}

#[axum::debug_handler]
pub async fn assign_user_token(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<AssignTokenRequest>,
) -> Result<StatusCode, AppError> {
    auth.ensure_is(user_id)?;

    let assigned =
        cutandgo_db::repositories::token::assign_user_token(&state.db_pool, user_id, &payload.token).await?;
    if !assigned {
        return Err(not_found("User", user_id).into());
    }

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn validate_user_token(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<TokenValidationResponse>, AppError> {
    let valid =
        cutandgo_db::repositories::token::validate_user_token(&state.db_pool, user_id, &query.token).await?;

    Ok(Json(TokenValidationResponse { valid }))
}

#[axum::debug_handler]
pub async fn validate_hairdresser_token(
    State(state): State<Arc<ApiState>>,
    Path(hairdresser_id): Path<Uuid>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<TokenValidationResponse>, AppError> {
    let valid = cutandgo_db::repositories::token::validate_hairdresser_token(
        &state.db_pool,
        hairdresser_id,
        &query.token,
    )
    .await?;

    Ok(Json(TokenValidationResponse { valid }))
}
