//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, full_name::FullName, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Unique index on `users.email`
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Unique index on `users.user_name_canonical`
const USER_NAME_UNIQUE_CONSTRAINT: &str = "users_user_name_canonical_key";

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    user_name,
    full_name,
    password_hash,
    is_active,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connectivity probe for the root endpoint
    pub async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}

fn select_users(tail: &str) -> String {
    format!("SELECT {USER_COLUMNS} FROM users {tail}")
}

/// Translate unique violations into domain errors
fn map_write_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(EMAIL_UNIQUE_CONSTRAINT) => return AuthError::EmailTaken,
                Some(USER_NAME_UNIQUE_CONSTRAINT) => return AuthError::UserNameTaken,
                _ => {}
            }
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                user_name,
                user_name_canonical,
                full_name,
                password_hash,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.user_name.as_ref().map(|n| n.original()))
        .bind(user.user_name.as_ref().map(|n| n.canonical()))
        .bind(user.full_name.as_ref().map(|n| n.as_str()))
        .bind(user.password_hash.as_ref().map(|p| p.as_phc_string()))
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = select_users("WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let sql = select_users("WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let sql = select_users("WHERE user_name_canonical = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_name.canonical())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self, offset: i64, limit: i64) -> AuthResult<Vec<User>> {
        let sql = select_users("ORDER BY created_at ASC, user_id ASC OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                user_name = $3,
                user_name_canonical = $4,
                full_name = $5,
                password_hash = $6,
                is_active = $7,
                updated_at = $8
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.user_name.as_ref().map(|n| n.original()))
        .bind(user.user_name.as_ref().map(|n| n.canonical()))
        .bind(user.full_name.as_ref().map(|n| n.as_str()))
        .bind(user.password_hash.as_ref().map(|p| p.as_phc_string()))
        .bind(user.is_active)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    user_name: Option<String>,
    full_name: Option<String>,
    password_hash: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        let password_hash = self.password_hash.map(UserPassword::from_stored);
        if password_hash.as_ref().is_some_and(|p| !p.is_phc_string()) {
            tracing::warn!(user_id = %self.user_id, "Stored password hash is not a PHC string");
        }

        User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            user_name: self.user_name.as_deref().map(UserName::from_db),
            full_name: self.full_name.map(FullName::from_db),
            password_hash,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
