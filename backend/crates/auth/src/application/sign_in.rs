//! Sign In Use Case
//!
//! Authenticates a user (or the configured administrator) and creates a session.

use std::sync::Arc;

use kernel::clock::Clock;
use kernel::id::UserId;
use platform::crypto::constant_time_eq;
use platform::password::PasswordHashError;

use crate::application::config::{AdminCredentials, AuthConfig};
use crate::application::create_session::CreateSessionUseCase;
use crate::application::password_hashing::{hash_password, verify_password};
use crate::domain::entity::session::Session;
use crate::domain::entity::user::User;
use crate::domain::repository::{CredentialRepository, SessionStore, UserRepository};
use crate::domain::value_object::{Email, RawPassword, UserName, UserPassword, UserRole};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// User name or email
    pub identifier: String,
    /// Password
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub session: Session,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository + CredentialRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    session_store: Arc<S>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository + CredentialRepository,
    S: SessionStore,
{
    pub fn new(
        user_repo: Arc<U>,
        session_store: Arc<S>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            session_store,
            config,
            clock,
        }
    }

    /// Unknown identifiers and wrong passwords both yield `InvalidCredentials`
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let identifier = input.identifier.trim();
        if identifier.is_empty() || input.password.is_empty() {
            return Err(AuthError::InvalidInput(
                "User name and password are required".to_string(),
            ));
        }

        let raw_password = RawPassword::for_sign_in(input.password);

        if let Some(admin) = &self.config.admin
            && is_admin_identifier(admin, identifier)
        {
            return self.sign_in_admin(admin, raw_password).await;
        }

        let Some(user) = self.find_user(identifier).await? else {
            // Pay one Argon2 run so unknown names cost the same as known ones
            hash_password(raw_password, &self.config).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let credential = CredentialRepository::find_by_user_id(&*self.user_repo, &user.user_id)
            .await?
            .ok_or_else(|| {
                AuthError::Internal(format!("Credential missing for user {}", user.user_id))
            })?;

        self.check_password(raw_password, credential.password_hash, &user)
            .await?;

        let session = self
            .create_session(user.user_id, user.display_name(), UserRole::User)
            .await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { session })
    }

    /// `@` marks an email address; anything else is a user name
    async fn find_user(&self, identifier: &str) -> AuthResult<Option<User>> {
        if identifier.contains('@') {
            match Email::new(identifier) {
                Ok(email) => self.user_repo.find_by_email(&email).await,
                Err(_) => Ok(None),
            }
        } else {
            match UserName::new(identifier) {
                Ok(user_name) => self.user_repo.find_by_user_name(&user_name).await,
                Err(_) => Ok(None),
            }
        }
    }

    async fn check_password(
        &self,
        raw_password: RawPassword,
        stored: UserPassword,
        user: &User,
    ) -> AuthResult<()> {
        match verify_password(raw_password, stored, &self.config).await? {
            Ok(true) => Ok(()),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(PasswordHashError::InvalidHashFormat) => {
                tracing::error!(
                    user_id = %user.user_id,
                    "Stored password hash could not be decoded"
                );
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => Err(AuthError::HashingFailed(e.to_string())),
        }
    }

    async fn sign_in_admin(
        &self,
        admin: &AdminCredentials,
        raw_password: RawPassword,
    ) -> AuthResult<SignInOutput> {
        let stored = UserPassword::from_db(admin.password_hash.as_phc_string());

        match verify_password(raw_password, stored, &self.config).await? {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::InvalidCredentials),
            Err(e) => {
                tracing::error!(error = %e, "Configured admin password hash is unusable");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let session = self
            .create_session(UserId::nil(), &admin.user_name, UserRole::Admin)
            .await?;

        tracing::info!("Administrator signed in");

        Ok(SignInOutput { session })
    }

    async fn create_session(
        &self,
        user_id: UserId,
        display_name: &str,
        user_role: UserRole,
    ) -> AuthResult<Session> {
        CreateSessionUseCase::new(
            self.session_store.clone(),
            self.config.clone(),
            self.clock.clone(),
        )
        .execute(user_id, display_name, user_role)
        .await
    }
}

fn is_admin_identifier(admin: &AdminCredentials, identifier: &str) -> bool {
    constant_time_eq(
        UserName::canonicalize(&admin.user_name).as_bytes(),
        UserName::canonicalize(identifier).as_bytes(),
    )
}
