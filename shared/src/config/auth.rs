//! Token signing configuration
//!
//! Read from `JWT_SECRET`, `JWT_ACCESS_TOKEN_EXPIRY`, `JWT_REFRESH_TOKEN_EXPIRY`,
//! `JWT_ISSUER`, `JWT_ALGORITHM`, `JWT_PRIVATE_KEY_PATH` and
//! `JWT_PUBLIC_KEY_PATH`. Lifetimes are in seconds.

use serde::{Deserialize, Serialize};

use super::env_value;

const DEV_SECRET: &str = "devmarket-local-signing-secret-not-for-production";

const MINUTE: i64 = 60;
const DAY: i64 = 24 * 60 * MINUTE;

/// JWT signing settings shared by access and refresh tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret; unused when signing with RS256
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    /// Value of the `iss` claim, checked on every parse
    pub issuer: String,
    /// `HS256`, `HS384`, `HS512` or `RS256`
    pub algorithm: String,
    #[serde(default)]
    pub private_key_path: Option<String>,
    #[serde(default)]
    pub public_key_path: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            access_token_expiry: 15 * MINUTE,
            refresh_token_expiry: 7 * DAY,
            issuer: "devmarket".to_string(),
            algorithm: "HS256".to_string(),
            private_key_path: None,
            public_key_path: None,
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: env_value("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_expiry: env_value("JWT_ACCESS_TOKEN_EXPIRY")
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_expiry: env_value("JWT_REFRESH_TOKEN_EXPIRY")
                .unwrap_or(defaults.refresh_token_expiry),
            issuer: env_value("JWT_ISSUER").unwrap_or(defaults.issuer),
            algorithm: env_value("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
            private_key_path: env_value("JWT_PRIVATE_KEY_PATH"),
            public_key_path: env_value("JWT_PUBLIC_KEY_PATH"),
        }
    }

    /// True while the built-in development secret is in use
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_token_lifetimes() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604_800);
        assert_eq!(config.issuer, "devmarket");
        assert_eq!(config.algorithm, "HS256");
        assert!(config.private_key_path.is_none());
    }

    #[test]
    fn test_default_secret_detection() {
        assert!(JwtConfig::default().is_using_default_secret());
        assert!(!JwtConfig::new("rotated-production-secret").is_using_default_secret());
    }
}
