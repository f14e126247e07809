//! Server Settings
//!
//! Read from the process environment (after `.env`). Parsing is a pure
//! function over a key lookup.

use std::net::SocketAddr;

use anyhow::{Context, bail};
use axum::http::HeaderValue;

/// JWT secret used when `SECRET_KEY` is unset
pub const DEFAULT_SECRET_KEY: &str = "change-this-to-a-long-random-secret-in-production";

/// Upper bound for `ACCESS_TOKEN_EXPIRE_MINUTES` (one year)
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 365;

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// Application settings
#[derive(Clone)]
pub struct Settings {
    pub app_name: String,
    pub debug: bool,
    pub secret_key: String,
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    pub log_json: bool,
    pub log_level: String,
    pub password_pepper: Option<String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("debug", &self.debug)
            .field("secret_key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("bind_addr", &self.bind_addr)
            .field("frontend_origins", &self.frontend_origins)
            .field("log_json", &self.log_json)
            .field("log_level", &self.log_level)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Settings {
    /// Load from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let debug = match get("DEBUG") {
            Some(v) => parse_bool("DEBUG", &v)?,
            None => false,
        };

        let access_token_expire_minutes = match get("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(v) => v
                .trim()
                .parse::<i64>()
                .context("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer")?,
            None => auth::config::DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
        };
        if !(1..=MAX_ACCESS_TOKEN_EXPIRE_MINUTES).contains(&access_token_expire_minutes) {
            bail!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {}",
                MAX_ACCESS_TOKEN_EXPIRE_MINUTES
            );
        }

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => 5,
        };
        if database_max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be greater than 0");
        }

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8000".to_string())
            .trim()
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8000")?;

        let frontend_origins = parse_origins(
            &get("FRONTEND_ORIGINS").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string()),
        )?;

        let log_json = match get("LOG_JSON") {
            Some(v) => parse_bool("LOG_JSON", &v)?,
            None => false,
        };

        let log_level = get("LOG_LEVEL")
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_else(|| if debug { "debug" } else { "info" }.to_string());
        if !["trace", "debug", "info", "warn", "error"].contains(&log_level.as_str()) {
            bail!("LOG_LEVEL must be one of trace, debug, info, warn, error");
        }

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| "AegisAI".to_string()),
            debug,
            secret_key: get("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            algorithm: get("ALGORITHM")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| "HS256".to_string()),
            access_token_expire_minutes,
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            log_json,
            log_level,
            password_pepper: get("PASSWORD_PEPPER"),
        })
    }

    /// `SECRET_KEY` was left at its placeholder
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Auth layer configuration derived from these settings
    pub fn auth_config(&self) -> anyhow::Result<auth::AuthConfig> {
        let ttl = chrono::Duration::try_minutes(self.access_token_expire_minutes)
            .context("ACCESS_TOKEN_EXPIRE_MINUTES is out of range")?;
        auth::AuthConfig::new(
            self.secret_key.as_bytes(),
            &self.algorithm,
            ttl,
            self.password_pepper.as_ref().map(|p| p.as_bytes().to_vec()),
        )
        .context("ALGORITHM must be one of HS256, HS384, HS512")
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{key} must be a boolean, got {other:?}"),
    }
}

fn parse_origins(raw: &str) -> anyhow::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("FRONTEND_ORIGINS contains an invalid origin {origin:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    const DB: (&str, &str) = ("DATABASE_URL", "postgres://localhost/aegis");

    #[test]
    fn test_defaults() {
        let s = settings(&[DB]).unwrap();
        assert_eq!(s.app_name, "AegisAI");
        assert!(!s.debug);
        assert!(s.uses_default_secret());
        assert_eq!(s.algorithm, "HS256");
        assert_eq!(s.access_token_expire_minutes, 30);
        assert_eq!(s.database_max_connections, 5);
        assert_eq!(s.bind_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(s.frontend_origins.len(), 2);
        assert!(!s.log_json);
        assert_eq!(s.log_level, "info");
        assert!(s.password_pepper.is_none());
    }

    #[test]
    fn test_debug_raises_default_log_level() {
        let s = settings(&[DB, ("DEBUG", "true")]).unwrap();
        assert_eq!(s.log_level, "debug");

        let s = settings(&[DB, ("DEBUG", "true"), ("LOG_LEVEL", "WARN")]).unwrap();
        assert_eq!(s.log_level, "warn");
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            DB,
            ("SECRET_KEY", "s3cret"),
            ("ALGORITHM", "HS512"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "5"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("FRONTEND_ORIGINS", "https://app.example.com, "),
            ("LOG_JSON", "1"),
            ("PASSWORD_PEPPER", "pepper"),
        ])
        .unwrap();
        assert!(!s.uses_default_secret());
        assert_eq!(s.access_token_expire_minutes, 5);
        assert_eq!(s.frontend_origins, vec![HeaderValue::from_static("https://app.example.com")]);
        assert!(s.log_json);
        assert_eq!(s.password_pepper.as_deref(), Some("pepper"));
        assert!(s.auth_config().is_ok());
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = settings(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = settings(&[DB, ("ACCESS_TOKEN_EXPIRE_MINUTES", "0")]).unwrap_err();
        assert!(err.to_string().contains("ACCESS_TOKEN_EXPIRE_MINUTES"));

        let err = settings(&[DB, ("ACCESS_TOKEN_EXPIRE_MINUTES", "soon")]).unwrap_err();
        assert!(err.to_string().contains("ACCESS_TOKEN_EXPIRE_MINUTES"));

        for huge in ["1000000000000", "9223372036854775807"] {
            let err = settings(&[DB, ("ACCESS_TOKEN_EXPIRE_MINUTES", huge)]).unwrap_err();
            assert!(err.to_string().contains("ACCESS_TOKEN_EXPIRE_MINUTES"));
        }

        let err = settings(&[DB, ("DEBUG", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("DEBUG"));

        let err = settings(&[DB, ("BIND_ADDR", "nowhere")]).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));

        let err = settings(&[DB, ("LOG_LEVEL", "loud")]).unwrap_err();
        assert!(err.to_string().contains("LOG_LEVEL"));
    }

    #[test]
    fn test_longest_ttl_issues_tokens() {
        let minutes = MAX_ACCESS_TOKEN_EXPIRE_MINUTES.to_string();
        let s = settings(&[DB, ("ACCESS_TOKEN_EXPIRE_MINUTES", minutes.as_str())]).unwrap();
        let config = s.auth_config().unwrap();
        assert!(
            config
                .issue_access_token(&kernel::id::UserId::new())
                .is_ok()
        );
    }

    #[test]
    fn test_unknown_algorithm_fails_auth_config() {
        let s = settings(&[DB, ("ALGORITHM", "RS256")]).unwrap();
        let err = s.auth_config().unwrap_err();
        assert!(err.to_string().contains("ALGORITHM"));
    }
}
