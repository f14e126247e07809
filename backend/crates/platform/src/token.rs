//! Access Token Codec
//!
//! Signed JWT access tokens (HMAC only):
//! - HS256 / HS384 / HS512
//! - `sub` carries the user id, `exp` is mandatory
//! - No leeway on expiry
//!
//! ## Examples
//! ```rust
//! use chrono::Duration;
//! use platform::token::TokenCodec;
//!
//! let codec = TokenCodec::new(b"a-long-enough-secret", "HS256").unwrap();
//! let token = codec.issue("user-123", Duration::minutes(30)).unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.sub, "user-123");
//! ```

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is missing")]
    Missing,

    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// Issues and verifies access tokens with a shared secret
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// `algorithm` is the JOSE name (`HS256`, `HS384`, `HS512`)
    pub fn new(secret: &[u8], algorithm: &str) -> Result<Self, TokenError> {
        Ok(Self::with_algorithm(secret, parse_algorithm(algorithm)?))
    }

    /// HS256 codec
    pub fn hs256(secret: &[u8]) -> Self {
        Self::with_algorithm(secret, Algorithm::HS256)
    }

    fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a compact JWT for `subject` valid for `ttl`
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("token expiry is out of range".to_string()))?;
        let claims = AccessClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify signature, algorithm and expiry, then return the claims
    pub fn decode(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, TokenError> {
    match name.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(TokenError::UnsupportedAlgorithm(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-with-enough-entropy-0123456789";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, "HS256").unwrap()
    }

    #[test]
    fn test_issue_and_decode() {
        let codec = codec();
        let token = codec.issue("42", Duration::minutes(30)).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_all_hmac_algorithms() {
        for name in ["HS256", "HS384", "HS512", "hs256"] {
            let codec = TokenCodec::new(SECRET, name).unwrap();
            let token = codec.issue("user", Duration::minutes(1)).unwrap();
            assert_eq!(codec.decode(&token).unwrap().sub, "user");
        }
    }

    #[test]
    fn test_unsupported_algorithm() {
        for name in ["RS256", "ES256", "none", ""] {
            assert!(matches!(
                TokenCodec::new(SECRET, name),
                Err(TokenError::UnsupportedAlgorithm(_))
            ));
        }
    }

    #[test]
    fn test_empty_token_is_missing() {
        assert_eq!(codec().decode(""), Err(TokenError::Missing));
        assert_eq!(codec().decode("   "), Err(TokenError::Missing));
    }

    #[test]
    fn test_expired_token() {
        let codec = codec();
        let token = codec.issue("42", Duration::seconds(-10)).unwrap();
        assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_ttl_past_calendar_range_is_an_error() {
        let err = codec().issue("42", Duration::days(200_000_000)).unwrap_err();
        assert!(matches!(err, TokenError::Encoding(_)));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = codec().issue("42", Duration::minutes(5)).unwrap();
        let other = TokenCodec::new(b"another-secret-entirely-0123456789", "HS256").unwrap();
        assert!(matches!(other.decode(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_algorithm_mismatch_is_invalid() {
        let token = TokenCodec::new(SECRET, "HS512")
            .unwrap()
            .issue("42", Duration::minutes(5))
            .unwrap();
        assert!(matches!(codec().decode(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            codec().decode("not.a.jwt"),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(
            codec().decode("garbage"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_sub_is_invalid() {
        #[derive(Serialize)]
        struct NoSubject {
            exp: i64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoSubject {
                exp: Utc::now().timestamp() + 600,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(matches!(codec().decode(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", codec());
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("test-secret"));
    }
}
