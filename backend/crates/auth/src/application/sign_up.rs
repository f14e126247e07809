//! Sign Up Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub user_name: Option<String>,
    pub full_name: Option<String>,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    /// Access token for the new account
    pub jwt: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let user_name = input
            .user_name
            .map(UserName::new)
            .transpose()
            .map_err(AppError::from)?;
        let full_name = FullName::parse_optional(input.full_name.as_deref())?;

        ensure_available(self.user_repo.as_ref(), &email, user_name.as_ref()).await?;

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(email, user_name, full_name, password_hash);

        self.user_repo.create(&user).await?;

        let jwt = self.config.issue_access_token(&user.user_id)?;

        tracing::info!(
            user_id = %user.user_id,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            email: user.email,
            created_at: user.created_at,
            jwt,
        })
    }
}

/// Reject an email or user name that is already registered
///
/// The repository's unique constraints remain the final word; this only
/// gives the common case a clean error before hashing.
pub(crate) async fn ensure_available<U>(
    user_repo: &U,
    email: &Email,
    user_name: Option<&UserName>,
) -> AuthResult<()>
where
    U: UserRepository,
{
    if user_repo.exists_by_email(email).await? {
        return Err(AuthError::EmailTaken);
    }

    if let Some(user_name) = user_name {
        if user_repo.exists_by_user_name(user_name).await? {
            return Err(AuthError::UserNameTaken);
        }
    }

    Ok(())
}
