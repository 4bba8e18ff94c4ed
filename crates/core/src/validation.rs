//! # Schedule Row Validation
//!
//! Decides whether a candidate schedule row may be stored next to the rows
//! already persisted for the same schedule. Rows are weekly recurring
//! half-open intervals `[start, end)` tagged with the weekdays they apply to.
//!
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. the candidate must satisfy `start < end`;
//! 2. for each sibling row (same schedule, different id), in order:
//!    an identical `(start, end, weekdays)` tuple is a duplicate, otherwise
//!    a shared weekday with intersecting time ranges is an overlap.
//!
//! The validator is a pure function. Callers must hand it a consistent
//! snapshot of the siblings, taken in the same transaction as the write.

use chrono::NaiveTime;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::ErrorCode;
use crate::models::schedule_row::ScheduleRow;

/// Why a candidate schedule row was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleRowConflict {
    #[error("Start and end of the row do not form a valid range")]
    InvalidRange,

    #[error("A row with the same start, end and weekdays already exists")]
    Duplicate { row_id: Option<Uuid> },

    #[error("Range overlaps an existing row on a shared weekday")]
    OverwriteRange { row_id: Option<Uuid> },
}

impl ScheduleRowConflict {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleRowConflict::InvalidRange => ErrorCode::IncorrectRange,
            ScheduleRowConflict::Duplicate { .. } => ErrorCode::Duplicate,
            ScheduleRowConflict::OverwriteRange { .. } => ErrorCode::OverwriteRange,
        }
    }

    /// Id of the persisted row the candidate collided with, if any.
    pub fn conflicting_row(&self) -> Option<Uuid> {
        match self {
            ScheduleRowConflict::InvalidRange => None,
            ScheduleRowConflict::Duplicate { row_id }
            | ScheduleRowConflict::OverwriteRange { row_id } => *row_id,
        }
    }
}

/// Half-open interval intersection: `[s1, e1)` and `[s2, e2)` overlap iff
/// `s1 < e2 && s2 < e1`. Touching endpoints do not overlap.
pub fn ranges_overlap(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && s2 < e1
}

/// Validates `candidate` against the persisted rows of its schedule.
pub fn validate_schedule_row(
    candidate: &ScheduleRow,
    existing: &[ScheduleRow],
) -> Result<(), ScheduleRowConflict> {
    if candidate.start >= candidate.end {
        return Err(ScheduleRowConflict::InvalidRange);
    }

    let siblings = existing
        .iter()
        .filter(|row| row.schedule_id == candidate.schedule_id && !row.is_same_row(candidate));

    for row in siblings {
        if row.start == candidate.start && row.end == candidate.end && row.days == candidate.days {
            return Err(ScheduleRowConflict::Duplicate { row_id: row.id });
        }

        if row.days.shares_day_with(&candidate.days)
            && ranges_overlap(candidate.start, candidate.end, row.start, row.end)
        {
            return Err(ScheduleRowConflict::OverwriteRange { row_id: row.id });
        }
    }

    Ok(())
}
