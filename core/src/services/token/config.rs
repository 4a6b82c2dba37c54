//! Configuration for the token service

use std::str::FromStr;

use chrono::Duration;
use dm_shared::config::JwtConfig;
use jsonwebtoken::Algorithm;

use crate::errors::{DomainError, TokenError};

use super::key_manager::Rs256KeyManager;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Value of the `iss` claim, enforced on parse
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_secs: i64,
    /// PEM private key path for RS256
    pub private_key_path: Option<String>,
    /// PEM public key path for RS256
    pub public_key_path: Option<String>,
}

/// Same defaults as `JwtConfig`
impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl TokenServiceConfig {
    pub fn access_token_lifetime(&self) -> Duration {
        Duration::seconds(self.access_token_expiry_secs)
    }

    pub fn refresh_token_lifetime(&self) -> Duration {
        Duration::seconds(self.refresh_token_expiry_secs)
    }

    /// Loads the RS256 key pair when the algorithm requires one
    ///
    /// Returns `Ok(None)` for HMAC algorithms. Any algorithm other than
    /// HS256, HS384, HS512 or RS256 is a `KeyLoadError`.
    pub fn load_key_manager(&self) -> Result<Option<Rs256KeyManager>, DomainError> {
        match self.algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => return Ok(None),
            Algorithm::RS256 => {}
            other => {
                return Err(DomainError::Token(TokenError::KeyLoadError {
                    message: format!("JWT algorithm {:?} is not supported", other),
                }))
            }
        }

        match (&self.private_key_path, &self.public_key_path) {
            (Some(private_key), Some(public_key)) => {
                Rs256KeyManager::new(private_key, public_key).map(Some)
            }
            _ => Err(DomainError::Token(TokenError::KeyLoadError {
                message: "RS256 requires JWT_PRIVATE_KEY_PATH and JWT_PUBLIC_KEY_PATH".to_string(),
            })),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        let algorithm = Algorithm::from_str(&config.algorithm).unwrap_or_else(|_| {
            tracing::warn!(
                algorithm = %config.algorithm,
                "Unsupported JWT algorithm, falling back to HS256"
            );
            Algorithm::HS256
        });

        Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            issuer: config.issuer.clone(),
            access_token_expiry_secs: config.access_token_expiry,
            refresh_token_expiry_secs: config.refresh_token_expiry,
            private_key_path: config.private_key_path.clone(),
            public_key_path: config.public_key_path.clone(),
        }
    }
}
