//! Session Entity
//!
//! A server-side session referenced by an opaque cookie token.
//!
//! ## Lifecycle
//! `absent → created → valid (now < expires_at) → expired or cleared → absent`
//!
//! Sessions are never renewed in place; signing in again issues a new token.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{SessionToken, UserId, UserRole};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub display_name: String,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    /// Absolute expiry
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring `ttl` after `now`
    pub fn new(
        token: SessionToken,
        user_id: UserId,
        display_name: impl Into<String>,
        user_role: UserRole,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            token,
            user_id,
            display_name: display_name.into(),
            user_role,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// A session is expired once `now` is strictly past its expiry
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
