//! User Name Value Object
//!
//! ユーザー名はログインと画面表示に使う公開ハンドル。
//!
//! ## 設計方針
//! - NFKC 正規化 → trim → 検証 の順で処理
//! - 入力の大文字小文字は表示用に保持し、一意性は小文字の canonical で判定
//! - `@` を含む識別子はメールアドレスとして扱うため、ユーザー名には使えない
//!
//! ## 不変条件
//! - 長さ: 1〜[`USER_NAME_MAX_LENGTH`] 文字（正規化後）
//! - 空白・制御文字・`@` を含まない

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after normalization
    Empty,

    /// User name is too long
    TooLong { length: usize, max: usize },

    /// User name contains whitespace
    ContainsWhitespace,

    /// User name contains a control character or `@`
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::ContainsWhitespace => write!(f, "User name cannot contain whitespace"),
            Self::InvalidCharacter { char, position } => {
                write!(f, "Invalid character {char:?} at position {position}")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated, normalized user name
///
/// # Storage
/// - `original`: The user's input (trimmed, NFKC normalized, preserves case)
/// - `canonical`: Lowercase form for uniqueness checks and lookups
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new UserName from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = Self::normalize_original(input.as_ref());
        Self::validate(&original)?;
        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Get the original user name (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (normalized, lowercase) user name
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    /// Canonical form of arbitrary input, for comparisons that must not fail
    pub fn canonicalize(input: &str) -> String {
        Self::normalize_original(input).to_lowercase()
    }

    fn normalize_original(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    fn validate(original: &str) -> Result<(), UserNameError> {
        if original.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = original.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if original.chars().any(char::is_whitespace) {
            return Err(UserNameError::ContainsWhitespace);
        }

        if let Some((position, char)) = original
            .chars()
            .enumerate()
            .find(|(_, c)| c.is_control() || *c == '@')
        {
            return Err(UserNameError::InvalidCharacter { char, position });
        }

        Ok(())
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.original).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_case_and_lowercases_canonical() {
        let name = UserName::new("  Alice_01 ").unwrap();
        assert_eq!(name.original(), "Alice_01");
        assert_eq!(name.canonical(), "alice_01");
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth letters fold to ASCII
        let name = UserName::new("ＡＢＣ").unwrap();
        assert_eq!(name.original(), "ABC");
        assert_eq!(UserName::canonicalize("ＡＢＣ"), "abc");
    }

    #[test]
    fn test_unicode_names_allowed() {
        let name = UserName::new("小明").unwrap();
        assert_eq!(name.canonical(), "小明");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
        assert_eq!(
            UserName::new("two words"),
            Err(UserNameError::ContainsWhitespace)
        );
        assert!(matches!(
            UserName::new("a@b"),
            Err(UserNameError::InvalidCharacter { char: '@', position: 1 })
        ));
        assert!(matches!(
            UserName::new("x".repeat(USER_NAME_MAX_LENGTH + 1)),
            Err(UserNameError::TooLong { .. })
        ));
        assert!(UserName::new("x".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let name: UserName = serde_json::from_str("\"Bob\"").unwrap();
        assert_eq!(name.canonical(), "bob");
        assert!(serde_json::from_str::<UserName>("\"\"").is_err());
    }
}
