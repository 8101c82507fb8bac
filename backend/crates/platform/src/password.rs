//! Password Hashing and Verification
//!
//! Argon2id password handling with:
//! - A fixed parameter set encoded into every hash (`m=65536,t=3,p=2`, 32-byte key)
//! - A fresh 16-byte salt per hash, drawn from the OS entropy source
//! - Zeroization of sensitive data
//! - Constant-time comparison of derived keys
//!
//! Hashes are stored in the PHC string format:
//!
//! ```text
//! $argon2id$v=19$m=65536,t=3,p=2$<salt>$<key>
//! ```
//!
//! where `<salt>` and `<key>` are unpadded standard base64. Any other
//! implementation producing this layout can be verified here and vice versa.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString},
};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length accepted at registration or password change
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Argon2 memory cost in KiB (64 MiB)
pub const MEMORY_COST_KIB: u32 = 65536;

/// Argon2 iterations
pub const ITERATIONS: u32 = 3;

/// Argon2 lanes
pub const PARALLELISM: u32 = 2;

/// Salt length in bytes
pub const SALT_LENGTH: usize = 16;

/// Derived key length in bytes
pub const KEY_LENGTH: usize = 32;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed (including entropy failure while drawing the salt)
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored string is not an Argon2id PHC hash
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Hash parameters
// ============================================================================

/// Argon2id cost parameters used when producing new hashes
///
/// Verification always uses the parameters recorded in the stored hash, so a
/// hash produced with [`HashParams::minimal`] still verifies after switching
/// back to [`HashParams::STANDARD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashParams {
    /// `m=65536,t=3,p=2`
    pub const STANDARD: Self = Self {
        memory_kib: MEMORY_COST_KIB,
        iterations: ITERATIONS,
        parallelism: PARALLELISM,
    };

    /// Cheapest parameters Argon2 accepts. Test suites only.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, PasswordHashError> {
        let params = Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(KEY_LENGTH),
        )
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashParams};
///
/// let password = ClearTextPassword::new("my secret".to_string()).unwrap();
/// let hashed = password.hash_with(HashParams::minimal(), None).unwrap();
/// assert!(hashed.verify(&password, None).unwrap());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password, enforcing the password policy
    ///
    /// - At least [`MIN_PASSWORD_LENGTH`] characters
    /// - At most [`MAX_PASSWORD_LENGTH`] characters
    /// - No control characters
    /// - Not empty/whitespace only
    ///
    /// The text is kept byte for byte; no Unicode normalization is applied.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::unchecked(raw);
        let text = password.0.as_str();

        if text.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points (not bytes)
        let char_count = text.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if text.chars().any(|ch| ch.is_control()) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    /// Wrap a password without applying the policy
    ///
    /// Used for sign-in, where credentials created under an older policy
    /// must keep working. The key is derived from the raw UTF-8 bytes, so
    /// hashes written by other Argon2id implementations verify unchanged.
    pub fn unchecked(raw: String) -> Self {
        Self(raw)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password with the standard Argon2id parameters
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        self.hash_with(HashParams::STANDARD, pepper)
    }

    /// Hash the password with explicit Argon2id parameters
    ///
    /// ## Arguments
    /// * `params` - Cost parameters, recorded in the output
    /// * `pepper` - Optional application-wide secret appended to the password
    pub fn hash_with(
        &self,
        params: HashParams,
        pepper: Option<&[u8]>,
    ) -> Result<HashedPassword, PasswordHashError> {
        let salt_bytes = Zeroizing::new(
            crypto::try_random_bytes(SALT_LENGTH)
                .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?,
        );
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        let hash = params
            .hasher()?
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
///
/// The string carries the algorithm, version, cost parameters, salt and
/// derived key, so verification needs nothing else.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a PHC string (e.g., from the database or configuration)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        parse_argon2id(&hash)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Re-derives the key with the salt and parameters recorded in the hash
    /// and compares it in constant time.
    ///
    /// ## Returns
    /// - `Ok(true)` / `Ok(false)` for a match / mismatch
    /// - `Err(InvalidHashFormat)` if the recorded parameters cannot be used
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        pepper: Option<&[u8]>,
    ) -> Result<bool, PasswordHashError> {
        let parsed = parse_argon2id(&self.hash)?;

        match Argon2::default().verify_password(&password.peppered(pepper), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(_) => Err(PasswordHashError::InvalidHashFormat),
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

fn parse_argon2id(s: &str) -> Result<PasswordHash<'_>, PasswordHashError> {
    let parsed = PasswordHash::new(s).map_err(|_| PasswordHashError::InvalidHashFormat)?;

    if parsed.algorithm != Algorithm::Argon2id.ident() {
        return Err(PasswordHashError::InvalidHashFormat);
    }
    if parsed.salt.is_none() || parsed.hash.is_none() {
        return Err(PasswordHashError::InvalidHashFormat);
    }

    Ok(parsed)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Generated by an independent Argon2id implementation:
    // password "correct horse battery", salt bytes 0x00..=0x0f.
    const INTEROP_HASH: &str = "$argon2id$v=19$m=65536,t=3,p=2$AAECAwQFBgcICQoLDA0ODw$YGTQgLP39y4svaUek7wvHmZ1P2afjeHEmkvlsf2Ekb0";

    fn fast_hash(password: &ClearTextPassword, pepper: Option<&[u8]>) -> HashedPassword {
        password.hash_with(HashParams::minimal(), pepper).unwrap()
    }

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::TooShort { min: 6, actual: 5 })
        ));
        assert!(ClearTextPassword::new("sixsix".to_string()).is_ok());
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_whitespace_only() {
        for raw in ["", "        "] {
            let result = ClearTextPassword::new(raw.to_string());
            assert!(matches!(
                result,
                Err(PasswordPolicyError::EmptyOrWhitespace)
            ));
        }
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("abc\u{0007}defg".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_unicode_password_counts_code_points() {
        // 6 code points, 18 bytes
        assert!(ClearTextPassword::new("パスワード!".to_string()).is_ok());
    }

    #[test]
    fn test_unchecked_skips_policy() {
        let password = ClearTextPassword::unchecked("abc".to_string());
        let hashed = fast_hash(&password, None);
        assert!(hashed.verify(&password, None).unwrap());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::unchecked("TestPassword123!".to_string());
        let hashed = fast_hash(&password, None);

        assert!(hashed.verify(&password, None).unwrap());

        let wrong_password = ClearTextPassword::unchecked("WrongPassword123!".to_string());
        assert!(!hashed.verify(&wrong_password, None).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let password = ClearTextPassword::unchecked("same input".to_string());
        let a = fast_hash(&password, None);
        let b = fast_hash(&password, None);

        assert_ne!(a.as_phc_string(), b.as_phc_string());
        assert!(a.verify(&password, None).unwrap());
        assert!(b.verify(&password, None).unwrap());
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::unchecked("TestPassword123!".to_string());
        let pepper = b"my_secret_pepper";
        let hashed = fast_hash(&password, Some(pepper));

        assert!(hashed.verify(&password, Some(pepper)).unwrap());
        assert!(!hashed.verify(&password, None).unwrap());
        assert!(!hashed.verify(&password, Some(b"wrong_pepper")).unwrap());
    }

    #[test]
    fn test_standard_hash_layout() {
        let password = ClearTextPassword::unchecked("layout check".to_string());
        let hashed = password.hash(None).unwrap();
        let phc = hashed.as_phc_string();

        assert!(phc.starts_with("$argon2id$v=19$m=65536,t=3,p=2$"));

        let parts: Vec<&str> = phc.split('$').collect();
        assert_eq!(parts.len(), 6);
        // 16 and 32 bytes in unpadded base64
        assert_eq!(parts[4].len(), 22);
        assert_eq!(parts[5].len(), 43);
        assert!(!phc.contains('='));

        assert!(hashed.verify(&password, None).unwrap());
    }

    #[test]
    fn test_verifies_externally_produced_hash() {
        let hashed = HashedPassword::from_phc_string(INTEROP_HASH).unwrap();

        let right = ClearTextPassword::unchecked("correct horse battery".to_string());
        let wrong = ClearTextPassword::unchecked("correct horse battery!".to_string());

        assert!(hashed.verify(&right, None).unwrap());
        assert!(!hashed.verify(&wrong, None).unwrap());
    }

    #[test]
    fn test_raw_bytes_are_hashed_without_normalization() {
        // Full-width forms change under NFKC
        let raw = "ｐａｓｓｗｏｒｄ１２３";
        let salt = SaltString::encode_b64(&[7u8; SALT_LENGTH]).unwrap();
        let external = HashParams::minimal()
            .hasher()
            .unwrap()
            .hash_password(raw.as_bytes(), &salt)
            .unwrap()
            .to_string();
        let hashed = HashedPassword::from_phc_string(external).unwrap();

        assert!(hashed.verify(&ClearTextPassword::unchecked(raw.to_string()), None).unwrap());
        assert!(!hashed.verify(&ClearTextPassword::unchecked("password123".to_string()), None).unwrap());
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::unchecked("TestPassword123!".to_string());
        let hashed = fast_hash(&password, None);

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None).unwrap());
    }

    #[test]
    fn test_invalid_phc_string() {
        for bad in [
            "not_a_valid_hash",
            "",
            "$argon2i$v=19$m=65536,t=3,p=2$AAECAwQFBgcICQoLDA0ODw$YGTQgLP39y4svaUek7wvHmZ1P2afjeHEmkvlsf2Ekb0",
            "$argon2id$v=19$m=65536,t=3,p=2$AAECAwQFBgcICQoLDA0ODw",
            "$argon2id$v=19$m=65536,t=3,p=2$!!!$YGTQgLP39y4svaUek7wvHmZ1P2afjeHEmkvlsf2Ekb0",
        ] {
            assert!(
                matches!(
                    HashedPassword::from_phc_string(bad),
                    Err(PasswordHashError::InvalidHashFormat)
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::unchecked("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = fast_hash(&password, None);
        assert!(!format!("{:?}", hashed).contains("argon2id"));
    }
}
