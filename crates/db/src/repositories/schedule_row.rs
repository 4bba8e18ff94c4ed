use chrono::NaiveTime;
use cutandgo_core::errors::{BookingError, BookingResult};
use cutandgo_core::models::schedule_row::{ScheduleRow, Weekdays};
use cutandgo_core::validation::{validate_schedule_row, ScheduleRowConflict};
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::DbScheduleRow;
use crate::{db_error, is_unique_violation};

const ROW_COLUMNS: &str = "id, schedule_id, start_time, end_time, \
    monday, tuesday, wednesday, thursday, friday, saturday, sunday";

pub async fn get_schedule_row_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbScheduleRow>> {
    tracing::debug!("Getting schedule row by id: {}", id);

    let row = sqlx::query_as::<_, DbScheduleRow>(&format!(
        "SELECT {} FROM schedule_rows WHERE id = $1",
        ROW_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_schedule_rows_by_schedule_id(
    pool: &Pool<Postgres>,
    schedule_id: Uuid,
) -> Result<Vec<DbScheduleRow>> {
    tracing::debug!("Getting schedule rows for schedule: {}", schedule_id);
    Ok(fetch_rows(pool, schedule_id).await?)
}

/// Rows of the salon's currently active schedule. Empty when no schedule is
/// active.
pub async fn get_active_schedule_rows(
    pool: &Pool<Postgres>,
    hairdresser_id: Uuid,
) -> Result<Vec<DbScheduleRow>> {
    tracing::debug!("Getting active schedule rows for hairdresser: {}", hairdresser_id);

    let rows = sqlx::query_as::<_, DbScheduleRow>(
        r#"
        SELECT r.id, r.schedule_id, r.start_time, r.end_time,
               r.monday, r.tuesday, r.wednesday, r.thursday, r.friday, r.saturday, r.sunday
        FROM schedule_rows r
        JOIN schedules s ON s.id = r.schedule_id
        WHERE s.hairdresser_id = $1 AND s.active
        ORDER BY r.start_time, r.end_time
        "#,
    )
    .bind(hairdresser_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Validates and inserts a new row.
///
/// The parent schedule is locked for the duration of the transaction, so two
/// concurrent writers to the same schedule observe each other's rows and the
/// validator always runs against a consistent snapshot.
pub async fn create_schedule_row(
    pool: &Pool<Postgres>,
    schedule_id: Uuid,
    start: NaiveTime,
    end: NaiveTime,
    days: Weekdays,
) -> BookingResult<DbScheduleRow> {
    let candidate = ScheduleRow::new(schedule_id, start, end, days);
    tracing::debug!("Creating schedule row: {:?}", candidate);

    let mut tx = pool.begin().await.map_err(db_error)?;
    lock_schedule(&mut tx, schedule_id).await?;

    let siblings = fetch_rows(&mut *tx, schedule_id).await.map_err(db_error)?;
    check_against(&candidate, &siblings)?;

    let id = Uuid::new_v4();
    let row = sqlx::query_as::<_, DbScheduleRow>(&format!(
        r#"
        INSERT INTO schedule_rows ({})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {}
        "#,
        ROW_COLUMNS, ROW_COLUMNS
    ))
    .bind(id)
    .bind(schedule_id)
    .bind(start)
    .bind(end)
    .bind(days.monday)
    .bind(days.tuesday)
    .bind(days.wednesday)
    .bind(days.thursday)
    .bind(days.friday)
    .bind(days.saturday)
    .bind(days.sunday)
    .fetch_one(&mut *tx)
    .await
    .map_err(storage_conflict)?;

    tx.commit().await.map_err(db_error)?;

    tracing::debug!("Schedule row created successfully: id={}", id);
    Ok(row)
}

/// Replaces the times and weekdays of an existing row, validated against its
/// siblings. The row's own previous version is not compared.
pub async fn update_schedule_row(
    pool: &Pool<Postgres>,
    id: Uuid,
    start: NaiveTime,
    end: NaiveTime,
    days: Weekdays,
) -> BookingResult<DbScheduleRow> {
    tracing::debug!("Updating schedule row: id={}", id);

    let mut tx = pool.begin().await.map_err(db_error)?;

    let schedule_id = sqlx::query_scalar::<_, Uuid>("SELECT schedule_id FROM schedule_rows WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?
        .ok_or_else(|| BookingError::NotFound(format!("Schedule row {} not found", id)))?;

    lock_schedule(&mut tx, schedule_id).await?;

    let candidate = ScheduleRow::new(schedule_id, start, end, days).with_id(id);
    let siblings = fetch_rows(&mut *tx, schedule_id).await.map_err(db_error)?;
    check_against(&candidate, &siblings)?;

    let row = sqlx::query_as::<_, DbScheduleRow>(&format!(
        r#"
        UPDATE schedule_rows
        SET start_time = $2, end_time = $3,
            monday = $4, tuesday = $5, wednesday = $6, thursday = $7,
            friday = $8, saturday = $9, sunday = $10
        WHERE id = $1
        RETURNING {}
        "#,
        ROW_COLUMNS
    ))
    .bind(id)
    .bind(start)
    .bind(end)
    .bind(days.monday)
    .bind(days.tuesday)
    .bind(days.wednesday)
    .bind(days.thursday)
    .bind(days.friday)
    .bind(days.saturday)
    .bind(days.sunday)
    .fetch_optional(&mut *tx)
    .await
    .map_err(storage_conflict)?
    .ok_or_else(|| BookingError::NotFound(format!("Schedule row {} not found", id)))?;

    tx.commit().await.map_err(db_error)?;

    Ok(row)
}

/// Runs the validator without writing anything.
pub async fn check_schedule_row(
    pool: &Pool<Postgres>,
    candidate: &ScheduleRow,
) -> BookingResult<Result<(), ScheduleRowConflict>> {
    let siblings = fetch_rows(pool, candidate.schedule_id)
        .await
        .map_err(db_error)?
        .iter()
        .map(ScheduleRow::from)
        .collect::<Vec<_>>();

    Ok(validate_schedule_row(candidate, &siblings))
}

pub async fn delete_schedule_row(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting schedule row: {}", id);

    let result = sqlx::query("DELETE FROM schedule_rows WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn delete_rows_of_schedule<'e, E>(executor: E, schedule_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM schedule_rows WHERE schedule_id = $1")
        .bind(schedule_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

async fn fetch_rows<'e, E>(executor: E, schedule_id: Uuid) -> Result<Vec<DbScheduleRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, DbScheduleRow>(&format!(
        "SELECT {} FROM schedule_rows WHERE schedule_id = $1 ORDER BY start_time, end_time, id",
        ROW_COLUMNS
    ))
    .bind(schedule_id)
    .fetch_all(executor)
    .await
}

async fn lock_schedule(tx: &mut Transaction<'_, Postgres>, schedule_id: Uuid) -> BookingResult<()> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM schedules WHERE id = $1 FOR UPDATE")
        .bind(schedule_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(db_error)?
        .map(|_| ())
        .ok_or_else(|| BookingError::NotFound(format!("Schedule {} not found", schedule_id)))
}

fn check_against(candidate: &ScheduleRow, siblings: &[DbScheduleRow]) -> BookingResult<()> {
    let existing: Vec<ScheduleRow> = siblings.iter().map(ScheduleRow::from).collect();

    validate_schedule_row(candidate, &existing).map_err(|conflict| {
        tracing::warn!(
            "Schedule row refused for schedule {}: {} (conflicting row: {:?})",
            candidate.schedule_id,
            conflict,
            conflict.conflicting_row()
        );
        BookingError::from(conflict)
    })
}

/// The unique constraint on the row tuple is the storage-level duplicate
/// check.
fn storage_conflict(err: sqlx::Error) -> BookingError {
    if is_unique_violation(&err) {
        BookingError::from(ScheduleRowConflict::Duplicate { row_id: None })
    } else {
        db_error(err)
    }
}
