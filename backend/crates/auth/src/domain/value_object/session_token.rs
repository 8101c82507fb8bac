//! Session Token Value Object
//!
//! 32 random bytes, URL-safe base64 without padding (43 characters).
//! The token is the only thing the browser holds; it never appears in logs.

use std::fmt;

use platform::crypto;

use crate::error::{AuthError, AuthResult};

/// Raw entropy per token
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Encoded length of a token
const SESSION_TOKEN_LENGTH: usize = 43;

/// Opaque session token
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Draw a fresh token from the OS entropy source
    pub fn generate() -> AuthResult<Self> {
        let bytes = crypto::try_random_bytes(SESSION_TOKEN_BYTES)
            .map_err(|e| AuthError::Internal(format!("Session token generation failed: {e}")))?;
        Ok(Self(crypto::to_base64_url(&bytes)))
    }

    /// Accept a token presented by a client
    ///
    /// Returns `None` for values that could never have been issued, so they
    /// are treated exactly like an unknown token.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == SESSION_TOKEN_LENGTH
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_well_formed_and_unique() {
        let a = SessionToken::generate().unwrap();
        let b = SessionToken::generate().unwrap();

        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), SESSION_TOKEN_LENGTH);
        assert_eq!(SessionToken::parse(a.as_str()), Some(a));
    }

    #[test]
    fn test_parse_rejects_foreign_values() {
        assert!(SessionToken::parse("").is_none());
        assert!(SessionToken::parse("short").is_none());
        assert!(SessionToken::parse(&"a".repeat(42)).is_none());
        assert!(SessionToken::parse(&format!("{}=", "a".repeat(42))).is_none());
        assert!(SessionToken::parse(&"a".repeat(43)).is_some());
    }

    #[test]
    fn test_debug_redaction() {
        let token = SessionToken::generate().unwrap();
        assert!(!format!("{token:?}").contains(token.as_str()));
    }
}
