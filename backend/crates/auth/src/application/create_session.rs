//! Create Session Use Case
//!
//! Issues a fresh session token for an authenticated principal.

use std::sync::Arc;

use kernel::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::{SessionToken, UserId, UserRole};
use crate::error::AuthResult;

/// Create session use case
pub struct CreateSessionUseCase<S>
where
    S: SessionStore,
{
    session_store: Arc<S>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<S> CreateSessionUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: Arc<S>, config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_store,
            config,
            clock,
        }
    }

    /// Store a new session expiring one TTL from now
    pub async fn execute(
        &self,
        user_id: UserId,
        display_name: &str,
        user_role: UserRole,
    ) -> AuthResult<Session> {
        let session = Session::new(
            SessionToken::generate()?,
            user_id,
            display_name,
            user_role,
            self.clock.now(),
            self.config.session_ttl,
        );

        self.session_store.insert(&session).await?;

        tracing::debug!(
            user_id = %session.user_id,
            user_role = %session.user_role,
            expires_at = %session.expires_at,
            "Session created"
        );

        Ok(session)
    }
}
