//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    ///
    /// Duplicate email or user name fails with `EmailTaken` / `UserNameTaken`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by user name (case-insensitive)
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Check if user name exists (case-insensitive)
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Page through users ordered by creation time
    async fn list(&self, offset: i64, limit: i64) -> AuthResult<Vec<User>>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;
}
