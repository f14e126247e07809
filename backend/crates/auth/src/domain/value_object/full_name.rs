//! Full Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

/// Maximum length for full name (in characters)
pub const FULL_NAME_MAX_LENGTH: usize = 100;

/// Display name, free-form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        let name = input.as_ref().trim();

        if name.is_empty() {
            return Err(invalid("Full name cannot be empty"));
        }

        if name.chars().count() > FULL_NAME_MAX_LENGTH {
            return Err(invalid(format!(
                "Full name must be at most {} characters",
                FULL_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(invalid("Full name contains invalid control characters"));
        }

        Ok(Self(name.to_string()))
    }

    /// Optional input: `None` stays `None`
    pub fn parse_optional(input: Option<&str>) -> AppResult<Option<Self>> {
        input.map(Self::new).transpose()
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(message: impl Into<std::borrow::Cow<'static, str>>) -> AppError {
    AppError::unprocessable(message).with_field("full_name")
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
