//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email already registered
    #[error("A user with this email already exists.")]
    EmailTaken,

    /// User name already registered (case-insensitive)
    #[error("A user with this username already exists.")]
    UserNameTaken,

    /// Unknown email, no password set, or wrong password
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Current password did not match on password change
    #[error("Incorrect password.")]
    IncorrectPassword,

    /// Account is deactivated
    #[error("Inactive user")]
    InactiveUser,

    /// No bearer token on the request
    #[error("Token is missing.")]
    TokenMissing,

    /// Bearer token failed verification or names no valid user id
    #[error("Could not validate credentials.")]
    InvalidToken,

    /// Authenticated user no longer exists
    #[error("User not found.")]
    UserNotFound,

    /// Input rejected by a value object or request extractor
    #[error("{0}")]
    Rejected(AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken | AuthError::UserNameTaken | AuthError::InactiveUser => {
                ErrorKind::BadRequest
            }
            AuthError::InvalidCredentials
            | AuthError::IncorrectPassword
            | AuthError::TokenMissing
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Rejected(err) => err.kind(),
            AuthError::Database(err) => classify_sqlx_error(err).0,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures are reported with a generic message; the detail
    /// stays in the log. Database errors take their status from the kernel
    /// sqlx classification.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Rejected(err) => err,
            AuthError::Database(ref err) => {
                let (kind, message) = classify_sqlx_error(err);
                let message = if kind.is_server_error() {
                    "Internal server error"
                } else {
                    message
                };
                AppError::new(kind, message).with_source(self)
            }
            AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error").with_source(self)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) if self.kind().is_server_error() => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Database(e) => {
                tracing::warn!(error = %e, "Auth database request rejected");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::IncorrectPassword => {
                tracing::warn!("Password change with wrong current password");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected access token");
            }
            AuthError::InactiveUser => {
                tracing::warn!("Login attempt on inactive account");
            }
            AuthError::Rejected(err) if err.is_server_error() => {
                tracing::error!(error = ?err, "Auth request failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let unauthorized = self.kind() == ErrorKind::Unauthorized;
        let mut response = self.into_app_error().into_response();
        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Rejected(err)
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => AuthError::TokenMissing,
            TokenError::Expired | TokenError::Invalid(_) => AuthError::InvalidToken,
            TokenError::UnsupportedAlgorithm(_) | TokenError::Encoding(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::UserNameTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InactiveUser.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::TokenMissing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejected_keeps_field() {
        let err: AuthError = AppError::unprocessable("Invalid email format")
            .with_field("email")
            .into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let app = err.into_app_error();
        assert_eq!(app.field(), Some("email"));
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app = AuthError::Internal("secret detail".into()).into_app_error();
        assert_eq!(app.message(), "Internal server error");
    }

    #[test]
    fn test_database_errors_follow_kernel_classification() {
        let reset = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = AuthError::Database(sqlx::Error::Io(reset));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        let app = err.into_app_error();
        assert_eq!(app.status_code(), 503);
        assert_eq!(app.message(), "Internal server error");

        let err = AuthError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.into_app_error().message(), "Record not found");

        let err = AuthError::Database(sqlx::Error::ColumnNotFound("email".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_app_error().message(), "Internal server error");
    }

    #[test]
    fn test_token_error_mapping() {
        assert!(matches!(
            AuthError::from(TokenError::Missing),
            AuthError::TokenMissing
        ));
        assert!(matches!(
            AuthError::from(TokenError::Expired),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            AuthError::from(TokenError::Invalid("bad".into())),
            AuthError::InvalidToken
        ));
    }

    #[test]
    fn test_unauthorized_response_has_challenge() {
        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let response = AuthError::EmailTaken.into_response();
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
