//! Administration Use Cases

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Back-office operations available to admin sessions
pub struct AdminUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    session_store: Arc<S>,
}

impl<U, S> AdminUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(user_repo: Arc<U>, session_store: Arc<S>) -> Self {
        Self {
            user_repo,
            session_store,
        }
    }

    /// All registered users, newest first
    pub async fn list_users(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list_all().await
    }

    /// Sign a user out everywhere
    pub async fn revoke_sessions(&self, user_id: &UserId) -> AuthResult<u64> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        let revoked = self.session_store.remove_for_user(user_id, None).await?;

        tracing::info!(
            user_id = %user_id,
            sessions_revoked = revoked,
            "Sessions revoked by administrator"
        );

        Ok(revoked)
    }
}
