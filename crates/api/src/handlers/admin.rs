use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use cutandgo_core::{
    errors::{BookingError, BookingResult},
    models::admin::{
        Admin, AdminExistsResponse, AdminRole, CompareRoleResponse, CreateAdminRequest, UpdateAdminRequest,
    },
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Returns the caller's role in the salon when it is at least `required`.
pub(crate) async fn require_role(
    pool: &PgPool,
    hairdresser_id: Uuid,
    auth: &AuthUser,
    required: AdminRole,
) -> BookingResult<AdminRole> {
    let admin = cutandgo_db::repositories::admin::get_admin(pool, hairdresser_id, auth.user_id)
        .await?
        .ok_or_else(|| BookingError::Authorization("Not an admin of this hairdresser".to_string()))?;
    let role = AdminRole::try_from(admin.role)?;

    if !role.can_manage(required) {
        tracing::warn!(
            "User {} with role {:?} needs {:?} on hairdresser {}",
            auth.user_id, role, required, hairdresser_id
        );
        return Err(BookingError::Authorization(format!(
            "Requires the {:?} role or higher",
            required
        )));
    }

    Ok(role)
}

#[axum::debug_handler]
pub async fn list_admins(
    State(state): State<Arc<ApiState>>,
    Path(hairdresser_id): Path<Uuid>,
) -> Result<Json<Vec<Admin>>, AppError> {
    let admins = cutandgo_db::repositories::admin::get_admins_by_hairdresser(&state.db_pool, hairdresser_id)
        .await?
        .into_iter()
        .map(Admin::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(admins))
}

#[axum::debug_handler]
pub async fn get_admin(
    State(state): State<Arc<ApiState>>,
    Path((hairdresser_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Admin>, AppError> {
    let db_admin = cutandgo_db::repositories::admin::get_admin(&state.db_pool, hairdresser_id, user_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!(
                "User {} is not an admin of hairdresser {}",
                user_id, hairdresser_id
            ))
        })?;

    Ok(Json(Admin::try_from(db_admin)?))
}

/// Adds an admin. The caller cannot grant a role above its own.
#[axum::debug_handler]
pub async fn create_admin(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(hairdresser_id): Path<Uuid>,
    Json(payload): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<Admin>), AppError> {
    require_role(&state.db_pool, hairdresser_id, &auth, payload.role).await?;

    let db_admin = cutandgo_db::repositories::admin::create_admin(
        &state.db_pool,
        hairdresser_id,
        payload.user_id,
        payload.role,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(Admin::try_from(db_admin)?)))
}

#[axum::debug_handler]
pub async fn update_admin(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path((hairdresser_id, user_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateAdminRequest>,
) -> Result<Json<Admin>, AppError> {
    require_role(&state.db_pool, hairdresser_id, &auth, payload.role).await?;

    let may_manage = cutandgo_db::repositories::admin::compare_admin_roles(
        &state.db_pool,
        hairdresser_id,
        auth.user_id,
        user_id,
    )
    .await?;
    if !may_manage {
        return Err(BookingError::Authorization("Insufficient role to change this admin".to_string()).into());
    }

    let db_admin =
        cutandgo_db::repositories::admin::update_admin_role(&state.db_pool, hairdresser_id, user_id, payload.role)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!(
                    "User {} is not an admin of hairdresser {}",
                    user_id, hairdresser_id
                ))
            })?;

    Ok(Json(Admin::try_from(db_admin)?))
}

#[axum::debug_handler]
pub async fn delete_admin(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path((hairdresser_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    cutandgo_db::repositories::admin::delete_admin(&state.db_pool, hairdresser_id, auth.user_id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn admin_exists(
    State(state): State<Arc<ApiState>>,
    Path((hairdresser_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<AdminExistsResponse>, AppError> {
    let exists = cutandgo_db::repositories::admin::admin_exists(&state.db_pool, hairdresser_id, user_id).await?;

    Ok(Json(AdminExistsResponse { exists }))
}

/// Whether the caller may manage the admin `user_id` of the salon.
#[axum::debug_handler]
pub async fn compare_admin(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path((hairdresser_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CompareRoleResponse>, AppError> {
    let can_manage = cutandgo_db::repositories::admin::compare_admin_roles(
        &state.db_pool,
        hairdresser_id,
        auth.user_id,
        user_id,
    )
    .await?;

    Ok(Json(CompareRoleResponse { can_manage }))
}
