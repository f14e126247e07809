//! Create User Use Case
//!
//! Adds a directory entry. The account has no password and cannot sign in
//! until one is set.

use std::sync::Arc;

use kernel::error::app_error::AppError;

use crate::application::sign_up::ensure_available;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, full_name::FullName, user_name::UserName};
use crate::error::AuthResult;

/// Create user input
pub struct CreateUserInput {
    pub email: String,
    pub user_name: String,
    pub full_name: Option<String>,
}

/// Create user use case
pub struct CreateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: CreateUserInput) -> AuthResult<User> {
        let email = Email::new(input.email)?;
        let user_name = UserName::new(input.user_name).map_err(AppError::from)?;
        let full_name = FullName::parse_optional(input.full_name.as_deref())?;

        ensure_available(self.user_repo.as_ref(), &email, Some(&user_name)).await?;

        let user = User::new_without_password(email, user_name, full_name);
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "Directory user created");

        Ok(user)
    }
}
