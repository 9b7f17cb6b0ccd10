//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET` - HMAC secret used to sign bearer tokens (min 32 bytes)
//!
//! ## Optional
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://marketplace.db`)
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 5000)
//! - `JWT_TTL_HOURS` - Token lifetime in hours (default: 168)
//! - `MAX_PAGE_SIZE` - Upper bound applied to the `limit` query parameter (default: 100)

use std::{
    env,
    fmt::Display,
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::info;

const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub jwt_secret: SecretString,
    pub jwt_ttl: Duration,
    pub max_page_size: u32,
}

impl Config {
    /// Load configuration from the process environment. `main` loads `.env`
    /// before calling this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `JWT_SECRET` is missing or too short, or if
    /// any optional variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::InvalidEnvVar(
                "JWT_SECRET".to_string(),
                format!("must be at least {MIN_JWT_SECRET_LENGTH} bytes"),
            ));
        }

        let jwt_ttl = token_ttl(try_load("JWT_TTL_HOURS", "168")?)?;

        let max_page_size: u32 = try_load("MAX_PAGE_SIZE", "100")?;
        if max_page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "MAX_PAGE_SIZE".to_string(),
                "must be positive".to_string(),
            ));
        }

        Ok(Self {
            database_url: try_load("DATABASE_URL", "sqlite://marketplace.db")?,
            host: try_load("HOST", "0.0.0.0")?,
            port: try_load("PORT", "5000")?,
            jwt_secret: SecretString::from(jwt_secret),
            jwt_ttl,
            max_page_size,
        })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// Token lifetime from a positive hour count. Expiry timestamps are
/// computed from `now + ttl`, so the sum must stay representable.
fn token_ttl(hours: i64) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::InvalidEnvVar("JWT_TTL_HOURS".to_string(), reason.to_string())
    };

    if hours <= 0 {
        return Err(invalid("must be positive"));
    }
    Duration::try_hours(hours)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| invalid("too large"))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
