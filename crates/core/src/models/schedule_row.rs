use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ErrorCode;
use crate::validation::ScheduleRowConflict;

/// The seven weekday flags of a recurring schedule row.
///
/// Serialized flat (`monday`, `tuesday`, ...) so it can be embedded in the
/// row payloads with `#[serde(flatten)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weekdays {
    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub saturday: bool,
    #[serde(default)]
    pub sunday: bool,
}

impl Weekdays {
    pub const NONE: Weekdays = Weekdays {
        monday: false,
        tuesday: false,
        wednesday: false,
        thursday: false,
        friday: false,
        saturday: false,
        sunday: false,
    };

    pub const WORKWEEK: Weekdays = Weekdays {
        monday: true,
        tuesday: true,
        wednesday: true,
        thursday: true,
        friday: true,
        saturday: false,
        sunday: false,
    };

    /// Bit `0` is Monday, bit `6` is Sunday.
    pub fn bits(&self) -> u8 {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
        .iter()
        .enumerate()
        .fold(0, |bits, (day, &on)| if on { bits | (1 << day) } else { bits })
    }

    pub fn from_bits(bits: u8) -> Self {
        let on = |day: u8| bits & (1 << day) != 0;
        Self {
            monday: on(0),
            tuesday: on(1),
            wednesday: on(2),
            thursday: on(3),
            friday: on(4),
            saturday: on(5),
            sunday: on(6),
        }
    }

    /// True when at least one day is flagged in both sets.
    pub fn shares_day_with(&self, other: &Weekdays) -> bool {
        self.bits() & other.bits() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits() == 0
    }
}

/// A recurring weekly time interval of a schedule.
///
/// `id` is `None` for candidates that have not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub schedule_id: Uuid,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(flatten)]
    pub days: Weekdays,
}

impl ScheduleRow {
    pub fn new(schedule_id: Uuid, start: NaiveTime, end: NaiveTime, days: Weekdays) -> Self {
        Self {
            id: None,
            schedule_id,
            start,
            end,
            days,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether `other` is the same persisted row as `self`.
    pub fn is_same_row(&self, other: &ScheduleRow) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

/// Payload for creating a row under `/api/schedules/:schedule_id/rows`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRowRequest {
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(flatten)]
    pub days: Weekdays,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScheduleRowRequest {
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(flatten)]
    pub days: Weekdays,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRowResponse {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(flatten)]
    pub days: Weekdays,
}

/// Outcome of a dry-run validation. `code` and `row_id` are only present
/// when the candidate was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateScheduleRowResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<Uuid>,
}

impl From<Result<(), ScheduleRowConflict>> for ValidateScheduleRowResponse {
    fn from(outcome: Result<(), ScheduleRowConflict>) -> Self {
        match outcome {
            Ok(()) => Self {
                valid: true,
                code: None,
                row_id: None,
            },
            Err(conflict) => Self {
                valid: false,
                code: Some(conflict.code()),
                row_id: conflict.conflicting_row(),
            },
        }
    }
}
