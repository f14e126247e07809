//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::app_error::{AppError, AppResult, ResultExt};
use kernel::error::kind::ErrorKind;
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with policy validation
    ///
    /// Policy failures are 422 with `field = "password"`.
    pub fn new(raw: String) -> AppResult<Self> {
        Self::with_field(raw, "password")
    }

    /// Same as [`RawPassword::new`], reporting failures against `field`
    pub fn with_field(raw: String, field: &'static str) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let err = match e {
                PasswordPolicyError::TooShort { .. } => AppError::unprocessable(e.to_string())
                    .with_action("Please choose a longer password"),
                PasswordPolicyError::TooLong { .. } => AppError::unprocessable(e.to_string())
                    .with_action("Please choose a shorter password"),
                PasswordPolicyError::EmptyOrWhitespace => {
                    AppError::unprocessable("Password cannot be empty")
                        .with_action("Please enter a password")
                }
                PasswordPolicyError::InvalidCharacter => {
                    AppError::unprocessable("Password contains invalid characters")
                        .with_action("Please remove any special control characters")
                }
            };
            err.with_field(field)
        })?;

        Ok(Self(clear_text))
    }

    /// Password submitted for verification (login, current password)
    ///
    /// The policy is not applied: only the stored hash decides.
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::new_unchecked(raw))
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

/// Hashed user password for database storage (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from raw password by hashing
    ///
    /// ## Arguments
    /// * `raw` - The validated raw password
    /// * `pepper` - Optional application-wide secret
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_app_err(ErrorKind::InternalServerError, "Password hashing failed")?;

        Ok(Self(hashed))
    }

    /// Load a stored hash as-is
    ///
    /// Values that are not PHC strings (legacy schemes, corruption) are kept so
    /// the account stays readable; they fail every verification.
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(stored))
    }

    /// False for a stored value that no Argon2 verifier can read
    pub fn is_phc_string(&self) -> bool {
        self.0.is_phc_string()
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// ## Arguments
    /// * `raw` - The raw password to verify
    /// * `pepper` - Must match the pepper used during hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
