//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;
use kernel::id::UserId;
use platform::token::{TokenCodec, TokenError};

use crate::error::{AuthError, AuthResult};

/// Default access token lifetime (30 minutes)
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access token signer/verifier
    pub token_codec: TokenCodec,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Build from the JWT secret and algorithm name
    pub fn new(
        secret: &[u8],
        algorithm: &str,
        access_token_ttl: Duration,
        password_pepper: Option<Vec<u8>>,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            token_codec: TokenCodec::new(secret, algorithm)?,
            access_token_ttl,
            password_pepper,
        })
    }

    /// Create config with a random HS256 secret (for development and tests)
    pub fn development() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_codec: TokenCodec::hs256(&secret),
            access_token_ttl: Duration::minutes(DEFAULT_ACCESS_TOKEN_TTL_MINUTES),
            password_pepper: None,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Issue an access token whose subject is the user id
    pub fn issue_access_token(&self, user_id: &UserId) -> Result<String, TokenError> {
        self.token_codec
            .issue(&user_id.to_string(), self.access_token_ttl)
    }

    /// Verify an access token and return the user id it names
    ///
    /// A token whose subject is not a UUID is rejected like a bad signature.
    pub fn verify_access_token(&self, token: &str) -> AuthResult<UserId> {
        let claims = self.token_codec.decode(token)?;
        claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::InvalidToken)
    }
}
