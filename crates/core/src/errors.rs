use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ScheduleRowConflict;

/// Machine-readable code echoed to clients next to the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    RecordNotFound,
    Validation,
    Duplicate,
    IncorrectRange,
    OverwriteRange,
    Conflict,
    NotAuthenticated,
    NotAuthorized,
    GeneralError,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error(transparent)]
    ScheduleRow(#[from] ScheduleRowConflict),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::NotFound(_) => ErrorCode::RecordNotFound,
            BookingError::Validation(_) => ErrorCode::Validation,
            BookingError::Duplicate(_) => ErrorCode::Duplicate,
            BookingError::ScheduleRow(conflict) => conflict.code(),
            BookingError::Conflict(_) => ErrorCode::Conflict,
            BookingError::Authentication(_) => ErrorCode::NotAuthenticated,
            BookingError::Authorization(_) => ErrorCode::NotAuthorized,
            BookingError::Database(_) | BookingError::Internal(_) => ErrorCode::GeneralError,
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
