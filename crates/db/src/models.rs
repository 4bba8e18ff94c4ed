use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use cutandgo_core::errors::BookingError;
use cutandgo_core::models::{
    admin::{Admin, AdminRole},
    appointment::{Appointment, AppointmentStatus},
    appointment_service::AppointmentService,
    hairdresser::Hairdresser,
    schedule::Schedule,
    schedule_row::{ScheduleRow, ScheduleRowResponse, Weekdays},
    service::Service,
    user::User,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub email_confirmed: bool,
    pub image: String,
    pub password_hash: String,
    pub temp_token: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            last_name: user.last_name,
            phone: user.phone,
            email: user.email,
            email_confirmed: user.email_confirmed,
            image: user.image,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHairdresser {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: i32,
    pub image: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbHairdresser> for Hairdresser {
    fn from(hairdresser: DbHairdresser) -> Self {
        Self {
            id: hairdresser.id,
            name: hairdresser.name,
            phone: hairdresser.phone,
            address: hairdresser.address,
            postal_code: hairdresser.postal_code,
            image: hairdresser.image,
            created_at: hairdresser.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAdmin {
    pub hairdresser_id: Uuid,
    pub user_id: Uuid,
    pub role: i16,
}

impl TryFrom<DbAdmin> for Admin {
    type Error = BookingError;

    fn try_from(admin: DbAdmin) -> Result<Self, Self::Error> {
        Ok(Self {
            hairdresser_id: admin.hairdresser_id,
            user_id: admin.user_id,
            role: AdminRole::try_from(admin.role)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub hairdresser_id: Uuid,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbSchedule> for Schedule {
    fn from(schedule: DbSchedule) -> Self {
        Self {
            id: schedule.id,
            hairdresser_id: schedule.hairdresser_id,
            name: schedule.name,
            active: schedule.active,
            created_at: schedule.created_at,
        }
    }
}

/// Weekday flags are stored as seven boolean columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbScheduleRow {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl DbScheduleRow {
    pub fn days(&self) -> Weekdays {
        Weekdays {
            monday: self.monday,
            tuesday: self.tuesday,
            wednesday: self.wednesday,
            thursday: self.thursday,
            friday: self.friday,
            saturday: self.saturday,
            sunday: self.sunday,
        }
    }
}

impl From<&DbScheduleRow> for ScheduleRow {
    fn from(row: &DbScheduleRow) -> Self {
        ScheduleRow::new(row.schedule_id, row.start_time, row.end_time, row.days()).with_id(row.id)
    }
}

impl From<DbScheduleRow> for ScheduleRowResponse {
    fn from(row: DbScheduleRow) -> Self {
        Self {
            id: row.id,
            schedule_id: row.schedule_id,
            start: row.start_time,
            end: row.end_time,
            days: row.days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub hairdresser_id: Uuid,
    pub name: String,
    pub price_cents: i32,
    pub duration_minutes: i16,
    pub created_at: DateTime<Utc>,
}

impl From<DbService> for Service {
    fn from(service: DbService) -> Self {
        Self {
            id: service.id,
            hairdresser_id: service.hairdresser_id,
            name: service.name,
            price_cents: service.price_cents,
            duration_minutes: service.duration_minutes,
            created_at: service.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hairdresser_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: i16,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = BookingError;

    fn try_from(appointment: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: appointment.id,
            user_id: appointment.user_id,
            hairdresser_id: appointment.hairdresser_id,
            date: appointment.date,
            time: appointment.time,
            status: AppointmentStatus::try_from(appointment.status)?,
            created_at: appointment.created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentService {
    pub appointment_id: Uuid,
    pub service_id: Uuid,
}

impl From<DbAppointmentService> for AppointmentService {
    fn from(link: DbAppointmentService) -> Self {
        Self {
            appointment_id: link.appointment_id,
            service_id: link.service_id,
        }
    }
}
