//! Application Layer
//!
//! Use cases and application services.

pub mod admin;
pub mod change_password;
pub mod check_session;
pub mod config;
pub mod create_session;
mod password_hashing;
pub mod session_sweeper;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use admin::AdminUseCase;
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use create_session::CreateSessionUseCase;
pub use session_sweeper::{CleanupExpiredSessionsUseCase, spawn_session_sweeper};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
