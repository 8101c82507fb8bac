//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;

use crate::domain::entity::{credential::Credential, session::Session, user::User};
use crate::domain::value_object::{Email, SessionToken, UserId, UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Store a new user together with its credential
    ///
    /// Fails with `UserNameTaken` / `EmailTaken` when a concurrent
    /// registration claimed the same name or email first.
    async fn create_with_credential(&self, user: &User, credential: &Credential)
    -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by canonical user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// All users, newest first
    async fn list_all(&self) -> AuthResult<Vec<User>>;
}

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Find the credential of a user
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credential>>;

    /// Replace the stored password hash
    async fn update(&self, credential: &Credential) -> AuthResult<()>;
}

/// Session table
///
/// Storage only; expiry rules live in the application layer.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Store a new session
    async fn insert(&self, session: &Session) -> AuthResult<()>;

    /// Look up a session by token, expired or not
    async fn find(&self, token: &SessionToken) -> AuthResult<Option<Session>>;

    /// Delete a session. Returns whether it existed.
    async fn remove(&self, token: &SessionToken) -> AuthResult<bool>;

    /// Delete every session of a user, optionally keeping one
    async fn remove_for_user(
        &self,
        user_id: &UserId,
        keep: Option<&SessionToken>,
    ) -> AuthResult<u64>;

    /// Delete every session expired at `now`
    async fn remove_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}

/// Hook run once after a user has been registered
///
/// Other feature crates use it to create per-user data (e.g. the badge set).
#[trait_variant::make(AccountProvisioner: Send)]
pub trait LocalAccountProvisioner {
    async fn provision(&self, user_id: &UserId) -> AppResult<()>;
}

/// Provisioner that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProvisioner;

impl AccountProvisioner for NoopProvisioner {
    async fn provision(&self, _user_id: &UserId) -> AppResult<()> {
        Ok(())
    }
}
