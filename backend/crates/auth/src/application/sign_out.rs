//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::domain::repository::SessionStore;
use crate::domain::value_object::SessionToken;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionStore,
{
    session_store: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: Arc<S>) -> Self {
        Self { session_store }
    }

    /// Delete the session behind the raw cookie value
    ///
    /// Unknown or malformed tokens are a no-op.
    pub async fn execute(&self, raw_token: Option<&str>) -> AuthResult<()> {
        let Some(token) = raw_token.and_then(SessionToken::parse) else {
            return Ok(());
        };

        if self.session_store.remove(&token).await? {
            tracing::info!("User signed out");
        }
        Ok(())
    }
}
