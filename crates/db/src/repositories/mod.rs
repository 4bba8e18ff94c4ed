pub mod admin;
pub mod appointment;
pub mod appointment_service;
pub mod hairdresser;
pub mod schedule;
pub mod schedule_row;
pub mod service;
pub mod token;
pub mod user;
