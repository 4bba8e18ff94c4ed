//! # Cut&Go Core
//!
//! Domain types shared by the database and API crates: salons, their admins,
//! schedules and schedule rows, services and appointments, plus the error
//! taxonomy and the schedule-row conflict validator.

pub mod errors;
pub mod models;
pub mod validation;
