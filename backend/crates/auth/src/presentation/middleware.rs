//! Auth Middleware
//!
//! Bearer-token authentication for protected routes.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Authenticated caller, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Extract the bearer token from the `Authorization` header
///
/// Returns `None` when the header is absent or uses another scheme.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
}

/// Middleware that requires a valid access token
pub async fn require_access_token(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> AuthResult<Response> {
    let token = bearer_token(req.headers()).ok_or(AuthError::TokenMissing)?;
    let user_id = config.verify_access_token(token)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::TokenMissing)
    }
}
