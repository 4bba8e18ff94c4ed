//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a uniform JSON body:
//!
//! ```json
//! { "error": "Resource not found: Schedule 42 not found", "code": "RECORD_NOT_FOUND" }
//! ```
//!
//! Storage and internal failures are logged and answered with a generic
//! message so driver details never reach clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cutandgo_core::errors::BookingError;
use cutandgo_core::validation::ScheduleRowConflict;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything that
/// converts into a [`BookingError`] or an `eyre::Report`.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Duplicate(_) => StatusCode::CONFLICT,
            BookingError::ScheduleRow(ScheduleRowConflict::InvalidRange) => StatusCode::BAD_REQUEST,
            BookingError::ScheduleRow(_) => StatusCode::CONFLICT,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BookingError::Authorization(_) => StatusCode::FORBIDDEN,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(json!({ "error": message, "code": self.0.code() }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Wraps untyped failures from the repositories in `BookingError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

impl From<ScheduleRowConflict> for AppError {
    fn from(conflict: ScheduleRowConflict) -> Self {
        AppError(BookingError::ScheduleRow(conflict))
    }
}

/// Maps a BookingError straight to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
