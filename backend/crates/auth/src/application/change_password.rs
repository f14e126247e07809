//! Change Password Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: ChangePasswordInput) -> AuthResult<()> {
        let current = RawPassword::for_verification(input.current_password);
        let new_password = RawPassword::with_field(input.new_password, "new_password")?;

        let mut user = self
            .user_repo
            .find_by_id(&input.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let verified = user
            .password_hash
            .as_ref()
            .is_some_and(|hash| hash.verify(&current, self.config.pepper()));
        if !verified {
            return Err(AuthError::IncorrectPassword);
        }

        user.set_password(UserPassword::from_raw(&new_password, self.config.pepper())?);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_in::{SignInInput, SignInUseCase};
    use crate::domain::entity::user::User;
    use crate::domain::value_object::email::Email;
    use crate::infra::memory::InMemoryUserRepository;

    const OLD: &str = "OldPassword123!";
    const NEW: &str = "NewPassword456!";

    async fn setup() -> (Arc<InMemoryUserRepository>, Arc<AuthConfig>, UserId) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::development());
        let raw = RawPassword::new(OLD.to_string()).unwrap();
        let user = User::new(
            Email::new("user@example.com").unwrap(),
            None,
            None,
            UserPassword::from_raw(&raw, None).unwrap(),
        );
        repo.create(&user).await.unwrap();
        (repo, config, user.user_id)
    }

    fn sign_in(password: &str) -> SignInInput {
        SignInInput {
            email: "user@example.com".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_change_password_replaces_hash() {
        let (repo, config, user_id) = setup().await;

        ChangePasswordUseCase::new(repo.clone(), config.clone())
            .execute(ChangePasswordInput {
                user_id,
                current_password: OLD.into(),
                new_password: NEW.into(),
            })
            .await
            .unwrap();

        let sign_in_use_case = SignInUseCase::new(repo, config);
        assert!(sign_in_use_case.execute(sign_in(NEW)).await.is_ok());
        assert!(sign_in_use_case.execute(sign_in(OLD)).await.is_err());
    }

    #[tokio::test]
    async fn test_wrong_current_password() {
        let (repo, config, user_id) = setup().await;

        let err = ChangePasswordUseCase::new(repo, config)
            .execute(ChangePasswordInput {
                user_id,
                current_password: "not-the-password".into(),
                new_password: NEW.into(),
            })
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::IncorrectPassword));
    }

    #[tokio::test]
    async fn test_weak_new_password() {
        let (repo, config, user_id) = setup().await;

        let err = ChangePasswordUseCase::new(repo, config)
            .execute(ChangePasswordInput {
                user_id,
                current_password: OLD.into(),
                new_password: "short".into(),
            })
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_app_error().field(), Some("new_password"));
    }
}
