use chrono::Utc;
use cutandgo_core::errors::{BookingError, BookingResult};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::db_error;
use crate::models::DbService;

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    tracing::debug!("Getting service by id: {}", id);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, hairdresser_id, name, price_cents, duration_minutes, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn get_services_by_hairdresser(pool: &Pool<Postgres>, hairdresser_id: Uuid) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, hairdresser_id, name, price_cents, duration_minutes, created_at
        FROM services
        WHERE hairdresser_id = $1
        ORDER BY name
        "#,
    )
    .bind(hairdresser_id)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_services_by_appointment(pool: &Pool<Postgres>, appointment_id: Uuid) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT s.id, s.hairdresser_id, s.name, s.price_cents, s.duration_minutes, s.created_at
        FROM services s
        JOIN appointment_services l ON l.service_id = s.id
        WHERE l.appointment_id = $1
        ORDER BY s.name
        "#,
    )
    .bind(appointment_id)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_services_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DbService>> {
    tracing::debug!("Getting {} services by id", ids.len());

    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, hairdresser_id, name, price_cents, duration_minutes, created_at
        FROM services
        WHERE id = ANY($1)
        ORDER BY name
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn create_service(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
    name: &str,
    price_cents: i32,
    duration_minutes: i16,
) -> BookingResult<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating service: id={}, hairdresser_id={}, name={}", id, hairdresser_id, name);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, hairdresser_id, name, price_cents, duration_minutes, created_at)
        SELECT $1, h.id, $3, $4, $5, $6
        FROM hairdressers h
        WHERE h.id = $2
        RETURNING id, hairdresser_id, name, price_cents, duration_minutes, created_at
        "#,
    )
    .bind(id)
    .bind(hairdresser_id)
    .bind(name)
    .bind(price_cents)
    .bind(duration_minutes)
    .bind(now)
    .fetch_optional(pool)
    .await
    .map_err(db_error)?;

    service.ok_or_else(|| BookingError::NotFound(format!("Hairdresser {} not found", hairdresser_id)))
}

pub async fn update_service(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: &str,
    price_cents: i32,
    duration_minutes: i16,
) -> Result<Option<DbService>> {
    tracing::debug!("Updating service: id={}", id);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        UPDATE services
        SET name = $2, price_cents = $3, duration_minutes = $4
        WHERE id = $1
        RETURNING id, hairdresser_id, name, price_cents, duration_minutes, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(price_cents)
    .bind(duration_minutes)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

/// Deletes a service together with the appointment links that reference it.
pub async fn delete_service(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting service: {}", id);

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM appointment_services WHERE service_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
