//! Current User Use Case
//!
//! Loads the account behind an authenticated request.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Current user use case
pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// `user_id` comes from a verified access token
    pub async fn execute(&self, user_id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, user_name::UserName};
    use crate::infra::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_current_user_found() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = User::new_without_password(
            Email::new("me@example.com").unwrap(),
            UserName::new("me_myself").unwrap(),
            None,
        );
        repo.create(&user).await.unwrap();

        let found = CurrentUserUseCase::new(repo)
            .execute(&user.user_id)
            .await
            .unwrap();
        assert_eq!(found.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_deleted_user_is_not_found() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let err = CurrentUserUseCase::new(repo)
            .execute(&UserId::new())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::UserNotFound));
        assert_eq!(err.to_string(), "User not found.");
    }
}
