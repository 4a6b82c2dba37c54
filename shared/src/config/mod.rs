//! Configuration module with business-specific sub-modules
//!
//! Every section has a `Default` suitable for local development and a
//! `from_env()` constructor that overrides individual fields from the
//! process environment. Unparseable values fall back to the default.
//!
//! - `auth` - JWT signing and token lifetimes
//! - `database` - MySQL pool settings
//! - `environment` - deployment environment and log output
//! - `server` - HTTP bind address

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Reads and parses an environment variable, ignoring blank or malformed values
pub(crate) fn env_value<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse().ok())
}

/// Reads a boolean switch such as `true`, `1` or `yes`
pub(crate) fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
}

/// Complete server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Defaults for every section, with logging tuned to `environment`
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from environment
    ///
    /// Logs a warning when tokens would be signed with the built-in
    /// development secret outside of development.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let config = Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        };

        if config.jwt.is_using_default_secret() && !environment.is_development() {
            tracing::warn!(
                environment = %environment,
                "JWT_SECRET is not set; tokens are signed with the development secret"
            );
        }

        config
    }
}
