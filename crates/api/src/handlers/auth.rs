use axum::{extract::State, Extension, Json};
use cutandgo_core::models::{
    auth::{LoginRequest, LoginResponse},
    user::User,
};
use std::sync::Arc;

use super::not_found;
use crate::{
    middleware::{auth::AuthUser, error_handling::AppError, jwt::issue_token},
    ApiState,
};

/// Exchanges e-mail and password for a bearer token.
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let db_user =
        cutandgo_db::repositories::user::verify_credentials(&state.db_pool, &payload.email, &payload.password)
            .await?;

    let token = issue_token(db_user.id, &db_user.email, &db_user.name, &state.jwt)?;
    tracing::info!("User {} logged in", db_user.id);

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expiration_minutes * 60,
        user: User::from(db_user),
    }))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<User>, AppError> {
    let db_user = cutandgo_db::repositories::user::get_user_by_id(&state.db_pool, auth.user_id)
        .await?
        .ok_or_else(|| not_found("User", auth.user_id))?;

    Ok(Json(User::from(db_user)))
}
