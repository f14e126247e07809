//! List Users Use Case

use std::sync::Arc;

use kernel::error::app_error::AppError;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// Paging window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListUsersInput {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// List users use case
pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: ListUsersInput) -> AuthResult<Vec<User>> {
        let skip = input.skip.unwrap_or(0);
        let limit = input.limit.unwrap_or(DEFAULT_LIMIT);

        if skip < 0 {
            return Err(AppError::unprocessable("skip must be greater than or equal to 0")
                .with_field("skip")
                .into());
        }

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::unprocessable(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            ))
            .with_field("limit")
            .into());
        }

        self.user_repo.list(skip, limit).await
    }
}
