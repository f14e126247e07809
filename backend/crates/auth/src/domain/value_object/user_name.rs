//! User Name Value Object
//!
//! ユーザー名は、ユーザーを識別するための公開ハンドル。
//! 表示とディレクトリ検索に使用される（ログインはメールアドレス）。
//!
//! ## 設計方針
//! - ASCII 文字のみ許可（a-z, A-Z, 0-9, _ . -）
//! - 入力の大文字小文字は保持し、一意性は小文字の canonical で判定
//!
//! ## 不変条件
//! - 長さ: 3〜50 文字（前後の空白除去後）
//! - 途中の空白禁止

use kernel::error::app_error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after trimming
    Empty,

    TooShort { length: usize, min: usize },

    TooLong { length: usize, max: usize },

    /// User name contains invalid character
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Username is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only letters, digits, _, ., - are allowed"
                )
            }
        }
    }
}

impl std::error::Error for UserNameError {}

impl From<UserNameError> for AppError {
    fn from(err: UserNameError) -> Self {
        AppError::unprocessable(err.to_string()).with_field("username")
    }
}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated user name
///
/// # Storage
/// - `original`: trimmed input, case preserved
/// - `canonical`: lowercase form for uniqueness checks
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new UserName from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = input.as_ref().trim().to_string();
        Self::validate(&original)?;
        let canonical = original.to_ascii_lowercase();
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

    /// Get the canonical (lowercase) user name
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Create from database value (assumes already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_ascii_lowercase(),
        }
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        match name.chars().enumerate().find(|&(_, c)| !Self::is_valid_char(c)) {
            Some((position, char)) => Err(UserNameError::InvalidCharacter { char, position }),
            None => Ok(()),
        }
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
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
    fn test_valid_user_names() {
        for name in ["abc", "john_doe", "John.Doe-42", "___"] {
            assert!(UserName::new(name).is_ok(), "{name} should be valid");
        }
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            UserName::new("ab"),
            Err(UserNameError::TooShort { length: 2, min: 3 })
        );
        assert_eq!(
            UserName::new("a".repeat(51)),
            Err(UserNameError::TooLong {
                length: 51,
                max: 50
            })
        );
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            UserName::new("john doe"),
            Err(UserNameError::InvalidCharacter {
                char: ' ',
                position: 4
            })
        );
        assert!(UserName::new("user+tag").is_err());
        assert!(UserName::new("ユーザー名").is_err());
    }

    #[test]
    fn test_case_preserved_and_canonical_lowercase() {
        let name = UserName::new("  JohnDoe  ").unwrap();
        assert_eq!(name.original(), "JohnDoe");
        assert_eq!(name.canonical(), "johndoe");
        assert_eq!(name.to_string(), "JohnDoe");
    }

    #[test]
    fn test_error_converts_to_unprocessable() {
        let err: AppError = UserName::new("x").unwrap_err().into();
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.field(), Some("username"));
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let name: UserName = serde_json::from_str(r#""Alice""#).unwrap();
        assert_eq!(name.canonical(), "alice");
        assert!(serde_json::from_str::<UserName>(r#""a""#).is_err());
    }
}
