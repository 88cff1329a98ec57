//! Process configuration, read once at startup

use std::env;

use anyhow::Context;
use auth::AuthConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Fails on the first missing or malformed variable
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match env::var("APP_PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("APP_PORT is not a valid port: {port}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let auth = AuthConfig::from_env().context("Invalid auth configuration")?;

        Ok(Self {
            database_url,
            port,
            frontend_origins,
            auth,
        })
    }
}
