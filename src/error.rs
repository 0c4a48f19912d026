use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::response::ApiResponse;

/// Domain errors surfaced by the attendance and request-workflow services.
///
/// Storage-level races (unique-constraint violations, conditional-update
/// misses) are always translated into the matching variant before they leave
/// the repository layer; callers never see raw database errors for them.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("already clocked in today")]
    DuplicateClockIn,

    #[error("no active clock-in found for today")]
    NoActiveClockIn,

    #[error("already clocked out today")]
    AlreadyClockedOut,

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("date is in the past: {0}")]
    PastDate(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateClockIn | AppError::AlreadyClockedOut | AppError::InvalidState(_) => {
                StatusCode::CONFLICT
            }
            AppError::NoActiveClockIn | AppError::InvalidRange(_) | AppError::PastDate(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            log::error!("request failed with status {}: {}", status_code, self);
        }

        // Never leak database details to clients.
        let message = match self {
            AppError::Database(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(&message))
    }
}
