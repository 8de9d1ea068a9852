use std::str::FromStr;

use folio_genai::GenAiConfig;

use crate::auth::identity::IdentityConfig;
use crate::auth::jwt::JwtConfig;

/// PIN used when `ADMIN_PIN` is not set.
pub const DEFAULT_ADMIN_PIN: &str = "123456";

/// Server configuration loaded from environment variables.
///
/// Every field has a development default. Missing external credentials
/// (database, identity provider, text generation) degrade the matching
/// feature with a warning instead of stopping the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Postgres URL for the document store. `None` serves seed data only.
    pub database_url: Option<String>,
    /// Second-step PIN, compared server-side.
    pub admin_pin: String,
    pub jwt: JwtConfig,
    pub identity: IdentityConfig,
    pub genai: GenAiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | unset                      |
    /// | `ADMIN_PIN`            | `123456` (with a warning)  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);

        let database_url = non_empty_env("DATABASE_URL");
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL is not set; serving seed data and rejecting writes");
        }

        let admin_pin = non_empty_env("ADMIN_PIN").unwrap_or_else(|| {
            tracing::warn!("ADMIN_PIN is not set; using the default PIN");
            DEFAULT_ADMIN_PIN.to_string()
        });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            admin_pin,
            jwt: JwtConfig::from_env(),
            identity: IdentityConfig::from_env(),
            genai: GenAiConfig::from_env(),
        }
    }
}

/// Read and parse `key`, falling back to `default` when unset or malformed.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

/// `Some(value)` when `key` is set to something other than whitespace.
pub(crate) fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
