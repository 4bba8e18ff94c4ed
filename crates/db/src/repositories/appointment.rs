use chrono::{NaiveDate, NaiveTime, Utc};
use cutandgo_core::errors::{BookingError, BookingResult};
use cutandgo_core::models::appointment::AppointmentStatus;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::db_error;
use crate::models::DbAppointment;

pub async fn get_appointment_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointment>> {
    tracing::debug!("Getting appointment by id: {}", id);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, user_id, hairdresser_id, date, time, status, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn get_appointments_by_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, user_id, hairdresser_id, date, time, status, created_at
        FROM appointments
        WHERE user_id = $1
        ORDER BY date, time
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_appointments_by_hairdresser(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, user_id, hairdresser_id, date, time, status, created_at
        FROM appointments
        WHERE hairdresser_id = $1
        ORDER BY date, time
        "#,
    )
    .bind(hairdresser_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Books an appointment. New appointments wait for the salon's approval.
pub async fn create_appointment(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    hairdresser_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
) -> BookingResult<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, user_id={}, hairdresser_id={}, at {} {}",
        id, user_id, hairdresser_id, date, time
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, user_id, hairdresser_id, date, time, status, created_at)
        SELECT $1, u.id, h.id, $4, $5, $6, $7
        FROM users u, hairdressers h
        WHERE u.id = $2 AND h.id = $3
        RETURNING id, user_id, hairdresser_id, date, time, status, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(hairdresser_id)
    .bind(date)
    .bind(time)
    .bind(AppointmentStatus::Unconfirmed.as_i16())
    .bind(now)
    .fetch_optional(pool)
    .await
    .map_err(db_error)?;

    appointment.ok_or_else(|| {
        BookingError::NotFound(format!(
            "User {} or hairdresser {} not found",
            user_id, hairdresser_id
        ))
    })
}

/// Moves the appointment. The status is kept unless a new one is given.
pub async fn update_appointment(
    pool: &Pool<Postgres>,
    id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
    status: Option<AppointmentStatus>,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Updating appointment: id={}", id);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET date = $2, time = $3, status = COALESCE($4, status)
        WHERE id = $1
        RETURNING id, user_id, hairdresser_id, date, time, status, created_at
        "#,
    )
    .bind(id)
    .bind(date)
    .bind(time)
    .bind(status.map(AppointmentStatus::as_i16))
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn approve_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointment>> {
    tracing::debug!("Approving appointment: {}", id);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING id, user_id, hairdresser_id, date, time, status, created_at
        "#,
    )
    .bind(id)
    .bind(AppointmentStatus::Active.as_i16())
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Deletes the appointment and its service links in one transaction.
pub async fn delete_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting appointment: {}", id);

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM appointment_services WHERE appointment_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
