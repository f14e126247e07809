//! User Entity
//!
//! Account record: identity, profile and credentials.

use chrono::{DateTime, SubsecRound, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, full_name::FullName, user_name::UserName, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Login identifier (unique, lowercase)
    pub email: Email,
    /// Public handle (unique case-insensitively)
    pub user_name: Option<UserName>,
    /// Display name
    pub full_name: Option<FullName>,
    /// Argon2id hash; `None` for directory-created users
    pub password_hash: Option<UserPassword>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new self-registered user
    pub fn new(
        email: Email,
        user_name: Option<UserName>,
        full_name: Option<FullName>,
        password_hash: UserPassword,
    ) -> Self {
        Self::build(email, user_name, full_name, Some(password_hash))
    }

    /// Create a directory entry without credentials
    pub fn new_without_password(
        email: Email,
        user_name: UserName,
        full_name: Option<FullName>,
    ) -> Self {
        Self::build(email, Some(user_name), full_name, None)
    }

    fn build(
        email: Email,
        user_name: Option<UserName>,
        full_name: Option<FullName>,
        password_hash: Option<UserPassword>,
    ) -> Self {
        let now = timestamp_now();

        Self {
            user_id: UserId::new(),
            email,
            user_name,
            full_name,
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Replace the password hash
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = Some(password_hash);
        self.updated_at = timestamp_now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = timestamp_now();
    }
}

/// Current time at the microsecond precision Postgres `timestamptz` stores
fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
