//! Argon2id work off the async runtime
//!
//! A standard-cost hash takes tens of milliseconds of CPU and 64 MiB of
//! memory, so both directions run on the blocking pool.

use platform::password::PasswordHashError;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Hash a password for storage
pub(crate) async fn hash_password(raw: RawPassword, config: &AuthConfig) -> AuthResult<UserPassword> {
    let params = config.hash_params;
    let pepper = config.password_pepper.clone();

    tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, params, pepper.as_deref()))
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))?
}

/// Verify a password against a stored hash
///
/// The inner result distinguishes a mismatch (`Ok(false)`) from a stored
/// hash that cannot be decoded.
pub(crate) async fn verify_password(
    raw: RawPassword,
    stored: UserPassword,
    config: &AuthConfig,
) -> AuthResult<Result<bool, PasswordHashError>> {
    let pepper = config.password_pepper.clone();

    tokio::task::spawn_blocking(move || stored.verify(&raw, pepper.as_deref()))
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))
}
