//! Sign Up Use Case
//!
//! Creates a new user account and signs it straight in.

use std::sync::Arc;

use kernel::clock::Clock;

use crate::application::config::AuthConfig;
use crate::application::create_session::CreateSessionUseCase;
use crate::application::password_hashing::hash_password;
use crate::domain::entity::{credential::Credential, session::Session, user::User};
use crate::domain::repository::{AccountProvisioner, SessionStore, UserRepository};
use crate::domain::value_object::{Email, RawPassword, UserName, UserRole};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    /// Must equal `password` when present
    pub password_confirmation: Option<String>,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user: User,
    pub session: Session,
}

/// Sign up use case
pub struct SignUpUseCase<U, S, P>
where
    U: UserRepository,
    S: SessionStore,
    P: AccountProvisioner,
{
    user_repo: Arc<U>,
    session_store: Arc<S>,
    provisioner: Arc<P>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U, S, P> SignUpUseCase<U, S, P>
where
    U: UserRepository,
    S: SessionStore,
    P: AccountProvisioner,
{
    pub fn new(
        user_repo: Arc<U>,
        session_store: Arc<S>,
        provisioner: Arc<P>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            session_store,
            provisioner,
            config,
            clock,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        let email = Email::new(input.email)?;

        if let Some(confirmation) = &input.password_confirmation
            && confirmation != &input.password
        {
            return Err(AuthError::PasswordValidation(
                "Passwords do not match".to_string(),
            ));
        }
        let raw_password = RawPassword::new(input.password)?;

        // The administrator name is never available to regular accounts
        if let Some(admin) = &self.config.admin
            && UserName::canonicalize(&admin.user_name) == user_name.canonical()
        {
            return Err(AuthError::UserNameTaken);
        }

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(raw_password, &self.config).await?;

        let now = self.clock.now();
        let user = User::new(user_name, email, now);
        let credential = Credential::new(user.user_id, password_hash, now);

        self.user_repo
            .create_with_credential(&user, &credential)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        // Registration stands even if per-user data could not be created
        if let Err(e) = self.provisioner.provision(&user.user_id).await {
            tracing::error!(user_id = %user.user_id, error = %e, "Account provisioning failed");
        }

        let session = CreateSessionUseCase::new(
            self.session_store.clone(),
            self.config.clone(),
            self.clock.clone(),
        )
        .execute(user.user_id, user.display_name(), UserRole::User)
        .await?;

        Ok(SignUpOutput { user, session })
    }
}
