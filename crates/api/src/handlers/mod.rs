pub mod admin;
pub mod appointment;
pub mod appointment_service;
pub mod auth;
pub mod hairdresser;
pub mod schedule;
pub mod schedule_row;
pub mod service;
pub mod token;
pub mod user;

use cutandgo_core::errors::BookingError;
use uuid::Uuid;

pub(crate) fn not_found(what: &str, id: Uuid) -> BookingError {
    BookingError::NotFound(format!("{} with ID {} not found", what, id))
}
