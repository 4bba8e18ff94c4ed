use cutandgo_core::errors::{BookingError, BookingResult};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbAppointmentService;
use crate::{db_error, is_unique_violation};

pub async fn get_appointment_service(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
    service_id: Uuid,
) -> Result<Option<DbAppointmentService>> {
    let link = sqlx::query_as::<_, DbAppointmentService>(
        r#"
        SELECT appointment_id, service_id
        FROM appointment_services
        WHERE appointment_id = $1 AND service_id = $2
        "#,
    )
    .bind(appointment_id)
    .bind(service_id)
    .fetch_optional(pool)
    .await?;

    Ok(link)
}

pub async fn get_service_ids(pool: &Pool<Postgres>, appointment_id: Uuid) -> Result<Vec<Uuid>> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        "SELECT service_id FROM appointment_services WHERE appointment_id = $1",
    )
    .bind(appointment_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

pub async fn get_appointment_services(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
) -> Result<Vec<DbAppointmentService>> {
    let links = sqlx::query_as::<_, DbAppointmentService>(
        r#"
        SELECT appointment_id, service_id
        FROM appointment_services
        WHERE appointment_id = $1
        "#,
    )
    .bind(appointment_id)
    .fetch_all(pool)
    .await?;

    Ok(links)
}

pub async fn create_appointment_service(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
    service_id: Uuid,
) -> BookingResult<DbAppointmentService> {
    tracing::debug!("Linking service {} to appointment {}", service_id, appointment_id);

    let link = sqlx::query_as::<_, DbAppointmentService>(
        r#"
        INSERT INTO appointment_services (appointment_id, service_id)
        SELECT a.id, s.id
        FROM appointments a, services s
        WHERE a.id = $1 AND s.id = $2
        RETURNING appointment_id, service_id
        "#,
    )
    .bind(appointment_id)
    .bind(service_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            BookingError::Duplicate(format!(
                "Service {} is already linked to appointment {}",
                service_id, appointment_id
            ))
        } else {
            db_error(e)
        }
    })?;

    link.ok_or_else(|| {
        BookingError::NotFound(format!(
            "Appointment {} or service {} not found",
            appointment_id, service_id
        ))
    })
}

pub async fn delete_appointment_service(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
    service_id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM appointment_services WHERE appointment_id = $1 AND service_id = $2",
    )
    .bind(appointment_id)
    .bind(service_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
