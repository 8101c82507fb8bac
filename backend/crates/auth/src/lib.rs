//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, guards
//!
//! ## Features
//! - Sign up with user name, email and password; sign in with either identifier
//! - Server-side sessions referenced by an opaque cookie token
//! - Configured administrator login and admin-only routes
//! - Password change that signs out the user's other sessions
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (m=65536 KiB, t=3, p=2), PHC string format
//! - Session tokens carry 256 bits of OS entropy
//! - Sessions expire 24 hours after creation and are never extended
//! - Session table is process-local; a restart signs everyone out

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::spawn_session_sweeper;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, InMemorySessionStore, PgAuthRepository};
pub use presentation::{AuthAppState, CurrentUser, SessionGuard, admin_router, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
