//! User Password Value Object
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`] is user input, zeroized on drop
//! - [`UserPassword`] is the stored Argon2id PHC string
//!
//! A stored string is only parsed when it is verified, so a corrupt row
//! surfaces as a verification error instead of failing the whole lookup.

use platform::password::{
    ClearTextPassword, HashParams, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password, enforcing the password policy
    ///
    /// Used at registration and password change.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let message = match e {
                PasswordPolicyError::TooShort { min, .. } => {
                    format!("Password must be at least {min} characters")
                }
                PasswordPolicyError::TooLong { max, .. } => {
                    format!("Password must be at most {max} characters")
                }
                PasswordPolicyError::EmptyOrWhitespace => "Password cannot be empty".to_string(),
                PasswordPolicyError::InvalidCharacter => {
                    "Password contains invalid characters".to_string()
                }
            };
            AuthError::PasswordValidation(message)
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a sign-in attempt without applying the policy
    pub fn for_sign_in(raw: String) -> Self {
        Self(ClearTextPassword::unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(String);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(
        raw: &RawPassword,
        params: HashParams,
        pepper: Option<&[u8]>,
    ) -> AuthResult<Self> {
        let hashed = raw
            .inner()
            .hash_with(params, pepper)
            .map_err(|e| AuthError::HashingFailed(e.to_string()))?;

        Ok(Self(hashed.as_phc_string().to_string()))
    }

    /// Wrap a stored PHC string without parsing it
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(phc_string.into())
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Verify a raw password against this hash
    ///
    /// ## Errors
    /// `InvalidHashFormat` when the stored string cannot be decoded.
    pub fn verify(
        &self,
        raw: &RawPassword,
        pepper: Option<&[u8]>,
    ) -> Result<bool, PasswordHashError> {
        HashedPassword::from_phc_string(self.0.as_str())?.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_errors_become_validation_errors() {
        let err = RawPassword::new("12345".to_string()).unwrap_err();
        assert!(matches!(err, AuthError::PasswordValidation(ref m) if m.contains("6")));
        assert!(RawPassword::new("123456".to_string()).is_ok());
    }

    #[test]
    fn test_sign_in_password_skips_policy() {
        let raw = RawPassword::for_sign_in("abc".to_string());
        let hashed = UserPassword::from_raw(&raw, HashParams::minimal(), None).unwrap();
        assert!(hashed.verify(&raw, None).unwrap());
    }

    #[test]
    fn test_verify_mismatch_and_corrupt_hash() {
        let raw = RawPassword::new("right password".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, HashParams::minimal(), None).unwrap();

        let wrong = RawPassword::for_sign_in("wrong password".to_string());
        assert!(!hashed.verify(&wrong, None).unwrap());

        let corrupt = UserPassword::from_db("$argon2id$garbage");
        assert!(matches!(
            corrupt.verify(&raw, None),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("top secret".to_string()).unwrap();
        assert!(!format!("{raw:?}").contains("secret"));
        let hashed = UserPassword::from_raw(&raw, HashParams::minimal(), None).unwrap();
        assert!(!format!("{hashed:?}").contains("argon2"));
    }
}
