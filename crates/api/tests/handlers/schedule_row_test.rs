use axum::{http::StatusCode, Json};
use chrono::NaiveTime;
use cutandgo_api::middleware::error_handling::AppError;
use cutandgo_core::{
    errors::{BookingError, ErrorCode},
    models::schedule_row::{
        CreateScheduleRowRequest, ScheduleRow, ScheduleRowResponse, ValidateScheduleRowResponse, Weekdays,
    },
    validation::{validate_schedule_row, ScheduleRowConflict},
};
use cutandgo_db::models::{DbSchedule, DbScheduleRow};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::TestContext;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn db_row(id: Uuid, schedule_id: Uuid, start: NaiveTime, end: NaiveTime, days: Weekdays) -> DbScheduleRow {
    DbScheduleRow {
        id,
        schedule_id,
        start_time: start,
        end_time: end,
        monday: days.monday,
        tuesday: days.tuesday,
        wednesday: days.wednesday,
        thursday: days.thursday,
        friday: days.friday,
        saturday: days.saturday,
        sunday: days.sunday,
    }
}

fn schedule(id: Uuid) -> DbSchedule {
    DbSchedule {
        id,
        hairdresser_id: Uuid::new_v4(),
        name: "Summer".to_string(),
        active: true,
        created_at: chrono::Utc::now(),
    }
}

// Mirrors the create handler with the repository swapped for the mock
async fn create_row_wrapper(
    ctx: &mut TestContext,
    schedule_id: Uuid,
    request: CreateScheduleRowRequest,
) -> Result<(StatusCode, Json<ScheduleRowResponse>), AppError> {
    let db_row = ctx
        .schedule_row_repo
        .create_schedule_row(schedule_id, request.start, request.end, request.days)
        .await?;

    Ok((StatusCode::CREATED, Json(ScheduleRowResponse::from(db_row))))
}

// Mirrors the dry-run handler
async fn validate_row_wrapper(
    ctx: &mut TestContext,
    schedule_id: Uuid,
    request: CreateScheduleRowRequest,
) -> Result<Json<ValidateScheduleRowResponse>, AppError> {
    ctx.schedule_repo
        .get_schedule_by_id(schedule_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Schedule with ID {} not found", schedule_id)))?;

    let existing: Vec<ScheduleRow> = ctx
        .schedule_row_repo
        .get_schedule_rows_by_schedule_id(schedule_id)
        .await?
        .iter()
        .map(ScheduleRow::from)
        .collect();
    let candidate = ScheduleRow::new(schedule_id, request.start, request.end, request.days);

    Ok(Json(ValidateScheduleRowResponse::from(validate_schedule_row(
        &candidate, &existing,
    ))))
}

#[tokio::test]
async fn test_create_row_success() {
    let mut ctx = TestContext::new();
    let schedule_id = Uuid::new_v4();
    let row_id = Uuid::new_v4();

    ctx.schedule_row_repo
        .expect_create_schedule_row()
        .with(
            predicate::eq(schedule_id),
            predicate::eq(t(9, 0)),
            predicate::eq(t(13, 0)),
            predicate::eq(Weekdays::WORKWEEK),
        )
        .times(1)
        .returning(move |schedule_id, start, end, days| Ok(db_row(row_id, schedule_id, start, end, days)));

    let request = CreateScheduleRowRequest {
        start: t(9, 0),
        end: t(13, 0),
        days: Weekdays::WORKWEEK,
    };

    let (status, Json(response)) = create_row_wrapper(&mut ctx, schedule_id, request).await.unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response.id, row_id);
    assert_eq!(response.days, Weekdays::WORKWEEK);
}

#[tokio::test]
async fn test_create_overlapping_row_is_a_conflict() {
    let mut ctx = TestContext::new();
    let schedule_id = Uuid::new_v4();
    let existing_id = Uuid::new_v4();

    ctx.schedule_row_repo
        .expect_create_schedule_row()
        .returning(move |_, _, _, _| {
            Err(BookingError::ScheduleRow(ScheduleRowConflict::OverwriteRange {
                row_id: Some(existing_id),
            }))
        });

    let request = CreateScheduleRowRequest {
        start: t(12, 0),
        end: t(14, 0),
        days: Weekdays::WORKWEEK,
    };

    let error = create_row_wrapper(&mut ctx, schedule_id, request).await.unwrap_err();

    assert_eq!(error.status(), StatusCode::CONFLICT);
    assert_eq!(error.0.code(), ErrorCode::OverwriteRange);
}

#[tokio::test]
async fn test_create_inverted_row_is_a_bad_request() {
    let mut ctx = TestContext::new();

    ctx.schedule_row_repo
        .expect_create_schedule_row()
        .returning(|_, _, _, _| Err(ScheduleRowConflict::InvalidRange.into()));

    let request = CreateScheduleRowRequest {
        start: t(18, 0),
        end: t(9, 0),
        days: Weekdays::WORKWEEK,
    };

    let error = create_row_wrapper(&mut ctx, Uuid::new_v4(), request).await.unwrap_err();

    assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error.0.code(), ErrorCode::IncorrectRange);
}

#[tokio::test]
async fn test_validate_reports_duplicate_without_writing() {
    let mut ctx = TestContext::new();
    let schedule_id = Uuid::new_v4();
    let existing_id = Uuid::new_v4();

    ctx.schedule_repo
        .expect_get_schedule_by_id()
        .with(predicate::eq(schedule_id))
        .returning(|id| Ok(Some(schedule(id))));
    ctx.schedule_row_repo
        .expect_get_schedule_rows_by_schedule_id()
        .with(predicate::eq(schedule_id))
        .returning(move |schedule_id| {
            Ok(vec![db_row(existing_id, schedule_id, t(9, 0), t(13, 0), Weekdays::WORKWEEK)])
        });
    ctx.schedule_row_repo.expect_create_schedule_row().never();

    let request = CreateScheduleRowRequest {
        start: t(9, 0),
        end: t(13, 0),
        days: Weekdays::WORKWEEK,
    };

    let Json(response) = validate_row_wrapper(&mut ctx, schedule_id, request).await.unwrap();

    assert_eq!(
        response,
        ValidateScheduleRowResponse {
            valid: false,
            code: Some(ErrorCode::Duplicate),
            row_id: Some(existing_id),
        }
    );
}

#[tokio::test]
async fn test_validate_accepts_other_weekdays() {
    let mut ctx = TestContext::new();
    let schedule_id = Uuid::new_v4();
    let saturday = Weekdays {
        saturday: true,
        ..Weekdays::NONE
    };

    ctx.schedule_repo
        .expect_get_schedule_by_id()
        .returning(|id| Ok(Some(schedule(id))));
    ctx.schedule_row_repo
        .expect_get_schedule_rows_by_schedule_id()
        .returning(move |schedule_id| {
            Ok(vec![db_row(Uuid::new_v4(), schedule_id, t(9, 0), t(13, 0), Weekdays::WORKWEEK)])
        });

    let request = CreateScheduleRowRequest {
        start: t(10, 0),
        end: t(12, 0),
        days: saturday,
    };

    let Json(response) = validate_row_wrapper(&mut ctx, schedule_id, request).await.unwrap();

    assert!(response.valid);
    assert_eq!(response.code, None);
}

#[tokio::test]
async fn test_validate_unknown_schedule() {
    let mut ctx = TestContext::new();
    let schedule_id = Uuid::new_v4();

    ctx.schedule_repo
        .expect_get_schedule_by_id()
        .returning(|_| Ok(None));

    let request = CreateScheduleRowRequest {
        start: t(9, 0),
        end: t(10, 0),
        days: Weekdays::WORKWEEK,
    };

    let result = validate_row_wrapper(&mut ctx, schedule_id, request).await;

    match result.unwrap_err().0 {
        BookingError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}
