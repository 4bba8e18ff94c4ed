use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Unconfirmed = 0,
    Active = 1,
}

impl AppointmentStatus {
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for AppointmentStatus {
    type Error = BookingError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AppointmentStatus::Unconfirmed),
            1 => Ok(AppointmentStatus::Active),
            other => Err(BookingError::Validation(format!(
                "Unknown appointment status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hairdresser_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub user_id: Uuid,
    pub hairdresser_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: Option<AppointmentStatus>,
}
