use cutandgo_core::errors::{BookingError, BookingResult};
use cutandgo_core::models::admin::AdminRole;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::hairdresser::lock_hairdresser;
use crate::db_error;
use crate::models::DbAdmin;

pub async fn get_admin(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
    user_id: Uuid,
) -> Result<Option<DbAdmin>> {
    tracing::debug!("Getting admin: hairdresser_id={}, user_id={}", hairdresser_id, user_id);

    let admin = sqlx::query_as::<_, DbAdmin>(
        r#"
        SELECT hairdresser_id, user_id, role
        FROM admins
        WHERE hairdresser_id = $1 AND user_id = $2
        "#,
    )
    .bind(hairdresser_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}

pub async fn get_admins_by_hairdresser(pool: &Pool<Postgres>, hairdresser_id: Uuid) -> Result<Vec<DbAdmin>> {
    let admins = sqlx::query_as::<_, DbAdmin>(
        r#"
        SELECT hairdresser_id, user_id, role
        FROM admins
        WHERE hairdresser_id = $1
        ORDER BY role, user_id
        "#,
    )
    .bind(hairdresser_id)
    .fetch_all(pool)
    .await?;

    Ok(admins)
}

pub async fn admin_exists(pool: &Pool<Postgres>, hairdresser_id: Uuid, user_id: Uuid) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM admins WHERE hairdresser_id = $1 AND user_id = $2)",
    )
    .bind(hairdresser_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Whether `acting_user_id` may manage `target_user_id` within the salon.
/// Both must be admins of it.
pub async fn compare_admin_roles(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
    acting_user_id: Uuid,
    target_user_id: Uuid,
) -> BookingResult<bool> {
    let acting = role_of(pool, hairdresser_id, acting_user_id).await?;
    let target = role_of(pool, hairdresser_id, target_user_id).await?;

    Ok(acting.can_manage(target))
}

pub async fn create_admin(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
    user_id: Uuid,
    role: AdminRole,
) -> BookingResult<DbAdmin> {
    tracing::debug!(
        "Creating admin: hairdresser_id={}, user_id={}, role={:?}",
        hairdresser_id, user_id, role
    );

    let admin = sqlx::query_as::<_, DbAdmin>(
        r#"
        INSERT INTO admins (hairdresser_id, user_id, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (hairdresser_id, user_id) DO NOTHING
        RETURNING hairdresser_id, user_id, role
        "#,
    )
    .bind(hairdresser_id)
    .bind(user_id)
    .bind(role.as_i16())
    .fetch_optional(pool)
    .await
    .map_err(db_error)?;

    admin.ok_or_else(|| {
        BookingError::Duplicate(format!(
            "User {} is already an admin of hairdresser {}",
            user_id, hairdresser_id
        ))
    })
}

pub async fn update_admin_role(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
    user_id: Uuid,
    role: AdminRole,
) -> Result<Option<DbAdmin>> {
    tracing::debug!(
        "Updating admin role: hairdresser_id={}, user_id={}, role={:?}",
        hairdresser_id, user_id, role
    );

    let admin = sqlx::query_as::<_, DbAdmin>(
        r#"
        UPDATE admins
        SET role = $3
        WHERE hairdresser_id = $1 AND user_id = $2
        RETURNING hairdresser_id, user_id, role
        "#,
    )
    .bind(hairdresser_id)
    .bind(user_id)
    .bind(role.as_i16())
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}

/// Removes `target_user_id` from the salon's admins. The acting admin must
/// hold a role at least as privileged as the target's.
pub async fn delete_admin(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
    acting_user_id: Uuid,
    target_user_id: Uuid,
) -> BookingResult<()> {
    if !compare_admin_roles(pool, hairdresser_id, acting_user_id, target_user_id).await? {
        tracing::warn!(
            "User {} may not remove admin {} from hairdresser {}",
            acting_user_id, target_user_id, hairdresser_id
        );
        return Err(BookingError::Authorization(
            "Insufficient role to remove this admin".to_string(),
        ));
    }

    let mut tx = pool.begin().await.map_err(db_error)?;
    lock_hairdresser(&mut tx, hairdresser_id).await.map_err(db_error)?;

    sqlx::query("DELETE FROM admins WHERE hairdresser_id = $1 AND user_id = $2")
        .bind(hairdresser_id)
        .bind(target_user_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

    tx.commit().await.map_err(db_error)?;

    Ok(())
}

async fn role_of(pool: &Pool<Postgres>, hairdresser_id: Uuid, user_id: Uuid) -> BookingResult<AdminRole> {
    let admin = get_admin(pool, hairdresser_id, user_id).await?.ok_or_else(|| {
        BookingError::NotFound(format!(
            "User {} is not an admin of hairdresser {}",
            user_id, hairdresser_id
        ))
    })?;

    AdminRole::try_from(admin.role)
}
