//! Get User Use Case

use std::sync::Arc;

use kernel::error::app_error::OptionExt;
use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Get user use case
pub struct GetUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<User> {
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_not_found(format!("User with id '{user_id}' not found."))?;

        Ok(user)
    }
}
