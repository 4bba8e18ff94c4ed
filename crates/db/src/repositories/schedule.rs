use chrono::Utc;
use cutandgo_core::errors::{BookingError, BookingResult};
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

use super::hairdresser::lock_hairdresser;
use super::schedule_row::delete_rows_of_schedule;
use crate::models::DbSchedule;
use crate::{db_error, is_unique_violation};

pub async fn get_schedule_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSchedule>> {
    tracing::debug!("Getting schedule by id: {}", id);

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, hairdresser_id, name, active, created_at
        FROM schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if let Some(s) = &schedule {
        tracing::debug!("Schedule found: id={}, name={}", s.id, s.name);
    } else {
        tracing::debug!("Schedule not found: id={}", id);
    }

    Ok(schedule)
}

pub async fn get_active_schedule(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
) -> Result<Option<DbSchedule>> {
    tracing::debug!("Getting active schedule for hairdresser: {}", hairdresser_id);

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, hairdresser_id, name, active, created_at
        FROM schedules
        WHERE hairdresser_id = $1 AND active
        "#,
    )
    .bind(hairdresser_id)
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

pub async fn get_schedule_names(pool: &Pool<Postgres>, hairdresser_id: Uuid) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT name FROM schedules WHERE hairdresser_id = $1 ORDER BY name",
    )
    .bind(hairdresser_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

pub async fn get_schedules_by_hairdresser(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
) -> Result<Vec<DbSchedule>> {
    tracing::debug!("Getting schedules for hairdresser: {}", hairdresser_id);

    let schedules = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, hairdresser_id, name, active, created_at
        FROM schedules
        WHERE hairdresser_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(hairdresser_id)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

/// Creates a schedule. Names are unique per salon regardless of case, and
/// an active schedule takes over from the previously active one.
pub async fn create_schedule(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
    name: &str,
    active: bool,
) -> BookingResult<DbSchedule> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating schedule: id={}, hairdresser_id={}, name={}, active={}",
        id, hairdresser_id, name, active
    );

    let mut tx = pool.begin().await.map_err(db_error)?;

    if !lock_hairdresser(&mut tx, hairdresser_id).await.map_err(db_error)? {
        return Err(BookingError::NotFound(format!("Hairdresser {} not found", hairdresser_id)));
    }

    ensure_unique_name(&mut *tx, hairdresser_id, name, None).await?;

    if active {
        deactivate_schedules(&mut *tx, hairdresser_id).await.map_err(db_error)?;
    }

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        INSERT INTO schedules (id, hairdresser_id, name, active, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, hairdresser_id, name, active, created_at
        "#,
    )
    .bind(id)
    .bind(hairdresser_id)
    .bind(name)
    .bind(active)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| name_conflict(e, name))?;

    tx.commit().await.map_err(db_error)?;

    tracing::debug!("Schedule created successfully: id={}", id);
    Ok(schedule)
}

pub async fn update_schedule(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: &str,
    active: bool,
) -> BookingResult<DbSchedule> {
    tracing::debug!("Updating schedule: id={}, name={}, active={}", id, name, active);

    let mut tx = pool.begin().await.map_err(db_error)?;

    let current = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, hairdresser_id, name, active, created_at
        FROM schedules
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_error)?
    .ok_or_else(|| BookingError::NotFound(format!("Schedule {} not found", id)))?;

    ensure_unique_name(&mut *tx, current.hairdresser_id, name, Some(id)).await?;

    if active && !current.active {
        deactivate_schedules(&mut *tx, current.hairdresser_id)
            .await
            .map_err(db_error)?;
    }

    let updated_schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        UPDATE schedules
        SET name = $2, active = $3
        WHERE id = $1
        RETURNING id, hairdresser_id, name, active, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(active)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| name_conflict(e, name))?;

    tx.commit().await.map_err(db_error)?;

    Ok(updated_schedule)
}

/// Deletes a schedule and its rows. A salon always keeps at least one
/// schedule, so deleting the last one is refused.
pub async fn delete_schedule(pool: &Pool<Postgres>, id: Uuid) -> BookingResult<()> {
    tracing::debug!("Deleting schedule: {}", id);

    let mut tx = pool.begin().await.map_err(db_error)?;

    let not_found = || BookingError::NotFound(format!("Schedule {} not found", id));

    let hairdresser_id = sqlx::query_scalar::<_, Uuid>("SELECT hairdresser_id FROM schedules WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?
        .ok_or_else(not_found)?;

    // Salon first, then the schedule.
    lock_hairdresser(&mut tx, hairdresser_id).await.map_err(db_error)?;

    sqlx::query_scalar::<_, Uuid>("SELECT id FROM schedules WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?
        .ok_or_else(not_found)?;

    let remaining = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM schedules WHERE hairdresser_id = $1",
    )
    .bind(hairdresser_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_error)?;

    if remaining <= 1 {
        tracing::warn!("Refusing to delete the last schedule {} of hairdresser {}", id, hairdresser_id);
        return Err(BookingError::Conflict(
            "A hairdresser must keep at least one schedule".to_string(),
        ));
    }

    let rows = delete_rows_of_schedule(&mut *tx, id).await.map_err(db_error)?;

    sqlx::query("DELETE FROM schedules WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

    tx.commit().await.map_err(db_error)?;

    tracing::debug!("Schedule {} deleted with {} rows", id, rows);
    Ok(())
}

/// Makes `schedule_id` the only active schedule of the salon.
pub async fn activate_schedule(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
    schedule_id: Uuid,
) -> BookingResult<DbSchedule> {
    tracing::debug!("Activating schedule {} of hairdresser {}", schedule_id, hairdresser_id);

    let mut tx = pool.begin().await.map_err(db_error)?;

    deactivate_schedules(&mut *tx, hairdresser_id)
        .await
        .map_err(db_error)?;

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        UPDATE schedules
        SET active = TRUE
        WHERE id = $1 AND hairdresser_id = $2
        RETURNING id, hairdresser_id, name, active, created_at
        "#,
    )
    .bind(schedule_id)
    .bind(hairdresser_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_error)?
    .ok_or_else(|| {
        BookingError::NotFound(format!(
            "Schedule {} not found for hairdresser {}",
            schedule_id, hairdresser_id
        ))
    })?;

    tx.commit().await.map_err(db_error)?;

    Ok(schedule)
}

async fn deactivate_schedules<'e, E>(executor: E, hairdresser_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("UPDATE schedules SET active = FALSE WHERE hairdresser_id = $1 AND active")
        .bind(hairdresser_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

async fn ensure_unique_name<'e, E>(
    executor: E,
    hairdresser_id: Uuid,
    name: &str,
    except: Option<Uuid>,
) -> BookingResult<()>
where
    E: PgExecutor<'e>,
{
    let taken = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM schedules
            WHERE hairdresser_id = $1
              AND LOWER(name) = LOWER($2)
              AND ($3::uuid IS NULL OR id <> $3)
        )
        "#,
    )
    .bind(hairdresser_id)
    .bind(name)
    .bind(except)
    .fetch_one(executor)
    .await
    .map_err(db_error)?;

    if taken {
        return Err(BookingError::Duplicate(format!("Schedule name '{}' is already used", name)));
    }

    Ok(())
}

fn name_conflict(err: sqlx::Error, name: &str) -> BookingError {
    if is_unique_violation(&err) {
        BookingError::Duplicate(format!("Schedule name '{}' is already used", name))
    } else {
        db_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{create_test_pool, seed_hairdresser};
    use pretty_assertions::assert_eq;

    async fn schedule_count(pool: &Pool<Postgres>, hairdresser_id: Uuid) -> usize {
        get_schedules_by_hairdresser(pool, hairdresser_id).await.unwrap().len()
    }

    #[tokio::test]
    async fn last_schedule_cannot_be_deleted() {
        let Some(pool) = create_test_pool().await else { return };
        let (_, hairdresser, winter) = seed_hairdresser(&pool).await;
        let summer = create_schedule(&pool, hairdresser.id, "Summer", false).await.unwrap();

        delete_schedule(&pool, summer.id).await.unwrap();
        let result = delete_schedule(&pool, winter.id).await;

        assert!(matches!(result, Err(BookingError::Conflict(_))));
        assert_eq!(schedule_count(&pool, hairdresser.id).await, 1);
    }

    #[tokio::test]
    async fn deleting_a_missing_schedule_is_not_found() {
        let Some(pool) = create_test_pool().await else { return };

        let result = delete_schedule(&pool, Uuid::new_v4()).await;

        assert!(matches!(result, Err(BookingError::NotFound(_))));
    }

    #[tokio::test]
    async fn concurrent_deletes_leave_one_schedule() {
        let Some(pool) = create_test_pool().await else { return };
        let (_, hairdresser, winter) = seed_hairdresser(&pool).await;
        let summer = create_schedule(&pool, hairdresser.id, "Summer", false).await.unwrap();

        let (first, second) = tokio::join!(
            delete_schedule(&pool, winter.id),
            delete_schedule(&pool, summer.id),
        );

        let refused = [&first, &second]
            .iter()
            .filter(|result| matches!(result, Err(BookingError::Conflict(_))))
            .count();
        assert_eq!(refused, 1);
        assert!(first.is_ok() || second.is_ok());
        assert_eq!(schedule_count(&pool, hairdresser.id).await, 1);
    }

    #[tokio::test]
    async fn names_are_unique_per_salon_ignoring_case() {
        let Some(pool) = create_test_pool().await else { return };
        let (_, hairdresser, _) = seed_hairdresser(&pool).await;

        let result = create_schedule(&pool, hairdresser.id, "WINTER", false).await;

        assert!(matches!(result, Err(BookingError::Duplicate(_))));
    }
}
