//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed user name, email or request field
    #[error("{0}")]
    InvalidInput(String),

    /// Password policy violation or confirmation mismatch
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// User name already exists
    #[error("User name already exists")]
    UserNameTaken,

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// Unknown identifier or wrong password (deliberately indistinguishable)
    #[error("Invalid user name or password")]
    InvalidCredentials,

    /// No session for the presented token
    #[error("Not signed in")]
    SessionNotFound,

    /// Session existed but is past its expiry
    #[error("Session expired")]
    SessionExpired,

    /// Authenticated, but not allowed to perform this operation
    #[error("Operation not permitted")]
    Forbidden,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Password hashing failed (e.g. entropy source unavailable)
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_) | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::UserNameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::SessionNotFound
            | AuthError::SessionExpired => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::HashingFailed(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// True for the two "not authenticated" session outcomes
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AuthError::SessionNotFound | AuthError::SessionExpired)
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the log; the response carries a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => {
                AppError::internal("Something went wrong, please try again later")
            }
            ErrorKind::Unauthorized => {
                AppError::unauthorized(self.to_string()).with_action("Sign in again")
            }
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::HashingFailed(msg) => {
                tracing::error!(message = %msg, "Password hashing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Forbidden => {
                tracing::warn!("Forbidden auth operation attempted");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
