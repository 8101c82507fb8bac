//! Habit Error Types
//!
//! Habit-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Habit-specific result type alias
pub type HabitResult<T> = Result<T, HabitError>;

#[derive(Debug, Error)]
pub enum HabitError {
    /// Malformed habit name, frequency or request field
    #[error("{0}")]
    InvalidInput(String),

    /// No such habit for this owner
    ///
    /// Habits owned by someone else are reported the same way.
    #[error("Habit not found")]
    HabitNotFound,

    /// A check-in already exists for the habit on this calendar day
    #[error("Already checked in today")]
    AlreadyCheckedIn,

    /// The caller has no habit data (administrator session)
    #[error("Habits are not available for this account")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HabitError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HabitError::InvalidInput(_) => ErrorKind::BadRequest,
            HabitError::HabitNotFound => ErrorKind::NotFound,
            HabitError::AlreadyCheckedIn => ErrorKind::Conflict,
            HabitError::Forbidden => ErrorKind::Forbidden,
            HabitError::Database(_) | HabitError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, keeping server-side details out of the message
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => {
                AppError::internal("Something went wrong, please try again later")
            }
            kind => AppError::new(kind, self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            HabitError::Database(e) => {
                tracing::error!(error = %e, "Habit database error");
            }
            HabitError::Internal(msg) => {
                tracing::error!(message = %msg, "Habit internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Habit error");
            }
        }
    }
}

impl IntoResponse for HabitError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<HabitError> for AppError {
    fn from(err: HabitError) -> Self {
        err.log();
        let app = err.to_app_error();
        app.with_source(err)
    }
}
