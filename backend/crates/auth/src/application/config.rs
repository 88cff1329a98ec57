//! Application Configuration
//!
//! Secrets, token lifetimes and the hash cost. Read once at process start by
//! [`AuthConfig::from_env`]; everything downstream receives it through
//! constructors.

use chrono::Duration;
use platform::cookie::{CookieConfig, SameSite};
use platform::token::TokenKey;
use thiserror::Error;

pub const ENV_ACCESS_SECRET: &str = "JWT_ACCESS_SECRET";
pub const ENV_ACCESS_EXPIRATION: &str = "JWT_ACCESS_EXPIRATION";
pub const ENV_REFRESH_SECRET: &str = "JWT_REFRESH_SECRET";
pub const ENV_REFRESH_EXPIRATION: &str = "JWT_REFRESH_EXPIRATION";
pub const ENV_HASH_COST: &str = "ENCRYPT_SALT_ROUNDS";

/// Name of the cookie carrying the refresh token
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_token: TokenKey,
    pub refresh_token: TokenKey,
    /// Work factor handed to the password hasher
    pub password_cost: u32,
    pub refresh_cookie_name: String,
    pub refresh_cookie_max_age: Duration,
}

impl AuthConfig {
    pub fn new(access_token: TokenKey, refresh_token: TokenKey, password_cost: u32) -> Self {
        Self {
            access_token,
            refresh_token,
            password_cost,
            refresh_cookie_name: REFRESH_COOKIE_NAME.to_string(),
            refresh_cookie_max_age: Duration::hours(1),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name -> value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let access_secret = required(ENV_ACCESS_SECRET)?;
        let refresh_secret = required(ENV_REFRESH_SECRET)?;
        if access_secret == refresh_secret {
            return Err(ConfigError::Invalid {
                name: ENV_REFRESH_SECRET,
                reason: "must differ from the access token secret".to_string(),
            });
        }

        let access_ttl =
            parse_env_duration(ENV_ACCESS_EXPIRATION, &required(ENV_ACCESS_EXPIRATION)?)?;
        let refresh_ttl =
            parse_env_duration(ENV_REFRESH_EXPIRATION, &required(ENV_REFRESH_EXPIRATION)?)?;

        let password_cost = required(ENV_HASH_COST)?
            .parse::<u32>()
            .ok()
            .filter(|cost| *cost > 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: ENV_HASH_COST,
                reason: "expected a positive integer".to_string(),
            })?;

        Ok(Self::new(
            TokenKey::new(access_secret, access_ttl),
            TokenKey::new(refresh_secret, refresh_ttl),
            password_cost,
        ))
    }

    /// Always `HttpOnly`, `Secure` and `SameSite=None`
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: true,
            http_only: true,
            same_site: SameSite::None,
            path: "/".to_string(),
            max_age_secs: Some(self.refresh_cookie_max_age.num_seconds()),
        }
    }
}

fn parse_env_duration(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_duration(value).map_err(|reason| ConfigError::Invalid { name, reason })
}

/// `"900"`, `"30s"`, `"15m"`, `"1h"`, `"7d"`. Must be positive.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);

    let amount: i64 = amount
        .parse()
        .map_err(|_| format!("`{value}` does not start with a number"))?;
    if amount <= 0 {
        return Err(format!("`{value}` must be positive"));
    }

    let seconds_per_unit = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        other => return Err(format!("unknown duration unit `{other}`")),
    };

    amount
        .checked_mul(seconds_per_unit)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| format!("`{value}` is out of range"))
}
