//! JWT encoding and decoding

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::Roles;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;
use super::key_manager::Rs256KeyManager;

/// Signs and parses the tokens of one issuer
///
/// The same key material signs and verifies. Parsing never tolerates clock
/// skew; `parse_allow_expired` is the only path that accepts a token past
/// its `exp`.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    strict: Validation,
    allow_expired: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from service configuration
    ///
    /// HS256 uses the configured secret; RS256 loads the PEM key pair named
    /// by the configuration.
    pub fn new(config: &TokenServiceConfig) -> Result<Self, DomainError> {
        match config.load_key_manager()? {
            Some(manager) => Ok(Self::from_key_manager(&manager, &config.issuer)),
            None => Ok(Self::with_keys(
                config.algorithm,
                EncodingKey::from_secret(config.jwt_secret.as_bytes()),
                DecodingKey::from_secret(config.jwt_secret.as_bytes()),
                &config.issuer,
            )),
        }
    }

    /// Creates an RS256 codec from a loaded key pair
    pub fn from_key_manager(manager: &Rs256KeyManager, issuer: &str) -> Self {
        Self::with_keys(
            Algorithm::RS256,
            manager.encoding_key().clone(),
            manager.decoding_key().clone(),
            issuer,
        )
    }

    /// Creates a codec from explicit key material
    pub fn with_keys(
        algorithm: Algorithm,
        encoding_key: EncodingKey,
        decoding_key: DecodingKey,
        issuer: &str,
    ) -> Self {
        let mut strict = Validation::new(algorithm);
        strict.set_issuer(&[issuer]);
        strict.set_required_spec_claims(&["exp", "sub", "iss"]);
        strict.leeway = 0;

        let mut allow_expired = strict.clone();
        allow_expired.validate_exp = false;

        Self {
            algorithm,
            issuer: issuer.to_string(),
            encoding_key,
            decoding_key,
            strict,
            allow_expired,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Signs a token for `subject` expiring at `expiry`
    ///
    /// Access tokens pass their roles; refresh tokens pass `None`.
    pub fn issue(
        &self,
        subject: &str,
        roles: Option<&Roles>,
        expiry: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(subject, self.issuer.as_str(), roles, expiry);
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Parses a token, rejecting anything expired, tampered or foreign
    pub fn parse_strict(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_with(token, &self.strict)
            .map_err(|_| DomainError::Token(TokenError::TokenInvalid))
    }

    /// Parses a token whose only permitted defect is being past its expiry
    pub fn parse_allow_expired(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_with(token, &self.allow_expired)
            .map_err(|_| DomainError::Token(TokenError::TokenInvalid))
    }

    /// Strict check as a boolean
    pub fn validate(&self, token: &str) -> bool {
        self.parse_strict(token).is_ok()
    }

    /// Strict parse that reports expiry as `TokenExpired`
    pub fn verify_access(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_with(token, &self.strict).map_err(|kind| match kind {
            Some(ErrorKind::ExpiredSignature) => DomainError::Token(TokenError::TokenExpired),
            _ => DomainError::Token(TokenError::TokenInvalid),
        })
    }

    /// `Err(None)` stands for input rejected before decoding
    fn decode_with(&self, token: &str, validation: &Validation) -> Result<Claims, Option<ErrorKind>> {
        let token = token.trim();
        if token.is_empty() {
            return Err(None);
        }

        decode::<Claims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                Some(e.into_kind())
            })
    }
}
