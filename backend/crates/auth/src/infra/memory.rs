//! In-Memory Implementations
//!
//! The session table is always process-local and volatile: every session is
//! lost on restart. The user repository here backs tests and local runs
//! without a database.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::entity::{credential::Credential, session::Session, user::User};
use crate::domain::repository::{CredentialRepository, SessionStore, UserRepository};
use crate::domain::value_object::{Email, SessionToken, UserId, UserName};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Session Store
// ============================================================================

/// Process-wide session table keyed by token
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionToken, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: &Session) -> AuthResult<()> {
        self.sessions
            .write()
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find(&self, token: &SessionToken) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().get(token).cloned())
    }

    async fn remove(&self, token: &SessionToken) -> AuthResult<bool> {
        Ok(self.sessions.write().remove(token).is_some())
    }

    async fn remove_for_user(
        &self,
        user_id: &UserId,
        keep: Option<&SessionToken>,
    ) -> AuthResult<u64> {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|token, session| session.user_id != *user_id || Some(token) == keep);
        Ok((before - sessions.len()) as u64)
    }

    async fn remove_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}

// ============================================================================
// User / Credential Repository
// ============================================================================

#[derive(Debug, Default)]
struct Accounts {
    users: HashMap<UserId, User>,
    credentials: HashMap<UserId, Credential>,
}

/// In-memory user and credential storage
#[derive(Debug, Default)]
pub struct InMemoryAuthRepository {
    accounts: RwLock<Accounts>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create_with_credential(
        &self,
        user: &User,
        credential: &Credential,
    ) -> AuthResult<()> {
        let mut accounts = self.accounts.write();

        // Same checks the unique indexes enforce in PostgreSQL
        if accounts
            .users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical())
        {
            return Err(AuthError::UserNameTaken);
        }
        if accounts.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        accounts.users.insert(user.user_id, user.clone());
        accounts
            .credentials
            .insert(credential.user_id, credential.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.accounts.read().users.get(user_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .accounts
            .read()
            .users
            .values()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .accounts
            .read()
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.find_by_user_name(user_name).await?.is_some())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn list_all(&self) -> AuthResult<Vec<User>> {
        let mut users: Vec<User> = self.accounts.read().users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

impl CredentialRepository for InMemoryAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        Ok(self.accounts.read().credentials.get(user_id).cloned())
    }

    async fn update(&self, credential: &Credential) -> AuthResult<()> {
        let mut accounts = self.accounts.write();
        match accounts.credentials.get_mut(&credential.user_id) {
            Some(stored) => {
                *stored = credential.clone();
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }
}
