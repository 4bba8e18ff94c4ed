use chrono::Utc;
use cutandgo_core::errors::{BookingError, BookingResult};
use cutandgo_core::models::admin::AdminRole;
use cutandgo_core::models::hairdresser::image_name;
use eyre::Result;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use super::token::generate_token;
use crate::db_error;
use crate::models::DbHairdresser;

/// Salon fields accepted on insert and update.
#[derive(Debug, Clone)]
pub struct HairdresserInput<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub postal_code: i32,
    pub image_extension: Option<&'a str>,
}

pub async fn get_hairdresser_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbHairdresser>> {
    tracing::debug!("Getting hairdresser by id: {}", id);

    let hairdresser = sqlx::query_as::<_, DbHairdresser>(
        r#"
        SELECT id, name, phone, address, postal_code, image, token, created_at
        FROM hairdressers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(hairdresser)
}

pub async fn get_hairdressers(pool: &Pool<Postgres>) -> Result<Vec<DbHairdresser>> {
    let hairdressers = sqlx::query_as::<_, DbHairdresser>(
        r#"
        SELECT id, name, phone, address, postal_code, image, token, created_at
        FROM hairdressers
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(hairdressers)
}

/// Case-insensitive substring match on the salon name.
pub async fn get_hairdressers_by_name(pool: &Pool<Postgres>, name: &str) -> Result<Vec<DbHairdresser>> {
    tracing::debug!("Filtering hairdressers by name: {}", name);

    let pattern = format!("%{}%", escape_like(name));
    let hairdressers = sqlx::query_as::<_, DbHairdresser>(
        r#"
        SELECT id, name, phone, address, postal_code, image, token, created_at
        FROM hairdressers
        WHERE name ILIKE $1
        ORDER BY name
        "#,
    )
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(hairdressers)
}

/// Salons the user administers, whatever the role.
pub async fn get_hairdressers_by_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Vec<DbHairdresser>> {
    let hairdressers = sqlx::query_as::<_, DbHairdresser>(
        r#"
        SELECT h.id, h.name, h.phone, h.address, h.postal_code, h.image, h.token, h.created_at
        FROM hairdressers h
        JOIN admins a ON a.hairdresser_id = h.id
        WHERE a.user_id = $1
        ORDER BY h.name
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(hairdressers)
}

/// E-mail addresses of every admin of the salon.
pub async fn get_hairdresser_emails(pool: &Pool<Postgres>, hairdresser_id: Uuid) -> Result<Vec<String>> {
    let emails = sqlx::query_scalar::<_, String>(
        r#"
        SELECT u.email
        FROM users u
        JOIN admins a ON a.user_id = u.id
        WHERE a.hairdresser_id = $1
        ORDER BY a.role, u.email
        "#,
    )
    .bind(hairdresser_id)
    .fetch_all(pool)
    .await?;

    Ok(emails)
}

/// Creates a salon owned by `owner_id`. The salon and its owner admin are
/// written in the same transaction.
pub async fn create_hairdresser(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    input: &HairdresserInput<'_>,
) -> BookingResult<DbHairdresser> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let image = image_name("hairdresser", id, input.image_extension);
    let token = generate_token();

    tracing::debug!("Creating hairdresser: id={}, name={}, owner={}", id, input.name, owner_id);

    let mut tx = pool.begin().await.map_err(db_error)?;

    let owner = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1")
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;

    if owner.is_none() {
        return Err(BookingError::NotFound(format!("User {} not found", owner_id)));
    }

    let hairdresser = sqlx::query_as::<_, DbHairdresser>(
        r#"
        INSERT INTO hairdressers (id, name, phone, address, postal_code, image, token, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, phone, address, postal_code, image, token, created_at
        "#,
    )
    .bind(id)
    .bind(input.name)
    .bind(input.phone)
    .bind(input.address)
    .bind(input.postal_code)
    .bind(image)
    .bind(token)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_error)?;

    sqlx::query("INSERT INTO admins (hairdresser_id, user_id, role) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(owner_id)
        .bind(AdminRole::Owner.as_i16())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

    tx.commit().await.map_err(db_error)?;

    tracing::debug!("Hairdresser created successfully: id={}", id);
    Ok(hairdresser)
}

pub async fn update_hairdresser(
    pool: &Pool<Postgres>,
    id: Uuid,
    input: &HairdresserInput<'_>,
) -> Result<Option<DbHairdresser>> {
    tracing::debug!("Updating hairdresser: id={}", id);

    // Without a new extension the stored image name is kept
    let image = image_name("hairdresser", id, input.image_extension);

    let hairdresser = sqlx::query_as::<_, DbHairdresser>(
        r#"
        UPDATE hairdressers
        SET name = $2, phone = $3, address = $4, postal_code = $5,
            image = CASE WHEN $6 = '' THEN image ELSE $6 END
        WHERE id = $1
        RETURNING id, name, phone, address, postal_code, image, token, created_at
        "#,
    )
    .bind(id)
    .bind(input.name)
    .bind(input.phone)
    .bind(input.address)
    .bind(input.postal_code)
    .bind(image)
    .fetch_optional(pool)
    .await?;

    Ok(hairdresser)
}

/// Deletes the salon and everything that hangs off it in one transaction.
pub async fn delete_hairdresser(pool: &Pool<Postgres>, id: Uuid) -> BookingResult<()> {
    tracing::debug!("Deleting hairdresser: {}", id);

    let mut tx = pool.begin().await.map_err(db_error)?;

    if !delete_hairdresser_in(&mut tx, id).await.map_err(db_error)? {
        return Err(BookingError::NotFound(format!("Hairdresser {} not found", id)));
    }

    tx.commit().await.map_err(db_error)?;

    tracing::info!("Hairdresser {} deleted", id);
    Ok(())
}

/// Cascade delete of a salon inside the caller's transaction. Dependents go
/// first: admins, schedule rows, schedules, appointment-service links,
/// appointments, services and finally the salon itself. Returns `false` when
/// the salon did not exist.
pub(crate) async fn delete_hairdresser_in(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let statements = [
        "DELETE FROM admins WHERE hairdresser_id = $1",
        r#"
        DELETE FROM schedule_rows
        WHERE schedule_id IN (SELECT id FROM schedules WHERE hairdresser_id = $1)
        "#,
        "DELETE FROM schedules WHERE hairdresser_id = $1",
        r#"
        DELETE FROM appointment_services
        WHERE appointment_id IN (SELECT id FROM appointments WHERE hairdresser_id = $1)
           OR service_id IN (SELECT id FROM services WHERE hairdresser_id = $1)
        "#,
        "DELETE FROM appointments WHERE hairdresser_id = $1",
        "DELETE FROM services WHERE hairdresser_id = $1",
    ];

    for statement in statements {
        sqlx::query(statement).bind(id).execute(&mut **tx).await?;
    }

    let result = sqlx::query("DELETE FROM hairdressers WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Row lock on the salon. Writers that check a per-salon count (schedules,
/// admins) take it first so concurrent checks run one after the other.
pub(crate) async fn lock_hairdresser(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM hairdressers WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(locked.is_some())
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
