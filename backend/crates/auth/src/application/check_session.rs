//! Check Session Use Case
//!
//! Resolves a presented token to a live session. Expiry is enforced lazily:
//! an expired entry is deleted the moment it is looked up.

use std::sync::Arc;

use kernel::clock::Clock;

use crate::domain::entity::session::Session;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionStore,
{
    session_store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_store,
            clock,
        }
    }

    /// Validate the raw cookie value
    ///
    /// ## Errors
    /// - `SessionNotFound` when no cookie, a malformed cookie or an unknown token is presented
    /// - `SessionExpired` when the session is past its expiry (the entry is removed)
    pub async fn execute(&self, raw_token: Option<&str>) -> AuthResult<Session> {
        let token = raw_token
            .and_then(SessionToken::parse)
            .ok_or(AuthError::SessionNotFound)?;

        let session = self
            .session_store
            .find(&token)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired_at(self.clock.now()) {
            self.session_store.remove(&token).await?;
            tracing::debug!(user_id = %session.user_id, "Expired session removed on access");
            return Err(AuthError::SessionExpired);
        }

        Ok(session)
    }
}
