//! Credential Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{UserId, UserPassword};

/// Password credential owned by a user
///
/// Created at registration and replaced only by an explicit password change.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub password_hash: UserPassword,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(user_id: UserId, password_hash: UserPassword, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            password_hash,
            updated_at: now,
        }
    }

    /// Swap in a new hash
    pub fn replace_password(&mut self, password_hash: UserPassword, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.updated_at = now;
    }
}
