//! RS256 key management for JWT signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::errors::{DomainError, TokenError};

/// Holder of the RS256 key pair used by the codec
#[derive(Clone)]
pub struct Rs256KeyManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Where the keys came from, `memory` for inline PEM
    source: PathBuf,
}

impl std::fmt::Debug for Rs256KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyManager")
            .field("source", &self.source)
            .finish()
    }
}

fn key_error(message: String) -> DomainError {
    DomainError::Token(TokenError::KeyLoadError { message })
}

impl Rs256KeyManager {
    /// Loads a key pair from PEM files
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - Path to the PEM-encoded RSA private key
    /// * `public_key_path` - Path to the PEM-encoded RSA public key
    ///
    /// # Errors
    ///
    /// `TokenError::KeyLoadError` when a file is unreadable or not valid PEM.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        private_key_path: P,
        public_key_path: Q,
    ) -> Result<Self, DomainError> {
        let private_key_path = private_key_path.as_ref();

        let private_key_pem = fs::read(private_key_path)
            .map_err(|e| key_error(format!("Failed to read private key: {}", e)))?;
        let public_key_pem = fs::read(public_key_path.as_ref())
            .map_err(|e| key_error(format!("Failed to read public key: {}", e)))?;

        let mut manager = Self::from_pem(&private_key_pem, &public_key_pem)?;
        manager.source = private_key_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::info!(source = ?manager.source, "Loaded RS256 signing keys");
        Ok(manager)
    }

    /// Builds a key pair from inline PEM strings
    pub fn from_pem_strings(private_key_pem: &str, public_key_pem: &str) -> Result<Self, DomainError> {
        Self::from_pem(private_key_pem.as_bytes(), public_key_pem.as_bytes())
    }

    fn from_pem(private_key_pem: &[u8], public_key_pem: &[u8]) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|e| key_error(format!("Invalid private key format: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|e| key_error(format!("Invalid public key format: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            source: PathBuf::from("memory"),
        })
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
