//! Change Password Use Case
//!
//! Replaces the credential of the signed-in user and revokes every other
//! session of that user.

use std::sync::Arc;

use kernel::clock::Clock;
use platform::password::PasswordHashError;

use crate::application::config::AuthConfig;
use crate::application::password_hashing::{hash_password, verify_password};
use crate::domain::entity::session::Session;
use crate::domain::repository::{CredentialRepository, SessionStore};
use crate::domain::value_object::RawPassword;
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
    /// Must equal `new_password` when present
    pub new_password_confirmation: Option<String>,
}

/// Change password use case
pub struct ChangePasswordUseCase<C, S>
where
    C: CredentialRepository,
    S: SessionStore,
{
    credential_repo: Arc<C>,
    session_store: Arc<S>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<C, S> ChangePasswordUseCase<C, S>
where
    C: CredentialRepository,
    S: SessionStore,
{
    pub fn new(
        credential_repo: Arc<C>,
        session_store: Arc<S>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credential_repo,
            session_store,
            config,
            clock,
        }
    }

    /// Returns the number of other sessions revoked
    pub async fn execute(&self, session: &Session, input: ChangePasswordInput) -> AuthResult<u64> {
        // The administrator's password lives in configuration
        if session.user_role.is_admin() || session.user_id.is_nil() {
            return Err(AuthError::Forbidden);
        }

        if let Some(confirmation) = &input.new_password_confirmation
            && confirmation != &input.new_password
        {
            return Err(AuthError::PasswordValidation(
                "Passwords do not match".to_string(),
            ));
        }

        let mut credential = self
            .credential_repo
            .find_by_user_id(&session.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let current = RawPassword::for_sign_in(input.current_password);
        match verify_password(current, credential.password_hash.clone(), &self.config).await? {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::InvalidCredentials),
            Err(PasswordHashError::InvalidHashFormat) => {
                tracing::error!(
                    user_id = %session.user_id,
                    "Stored password hash could not be decoded"
                );
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::HashingFailed(e.to_string())),
        }

        let new_password = RawPassword::new(input.new_password)?;
        let new_hash = hash_password(new_password, &self.config).await?;

        credential.replace_password(new_hash, self.clock.now());
        self.credential_repo.update(&credential).await?;

        let revoked = self
            .session_store
            .remove_for_user(&session.user_id, Some(&session.token))
            .await?;

        tracing::info!(
            user_id = %session.user_id,
            sessions_revoked = revoked,
            "Password changed"
        );

        Ok(revoked)
    }
}
