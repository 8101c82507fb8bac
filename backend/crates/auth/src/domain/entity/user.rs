//! User Entity
//!
//! Public profile of a registered account. Credentials live in
//! [`Credential`](super::credential::Credential) and never leave the auth crate.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{Email, UserId, UserName};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique, for login and display)
    pub user_name: UserName,
    /// Email (unique, alternative login identifier)
    pub email: Email,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, email: Email, now: DateTime<Utc>) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            created_at: now,
        }
    }

    /// Name shown in the UI and carried by the session
    pub fn display_name(&self) -> &str {
        self.user_name.original()
    }
}
