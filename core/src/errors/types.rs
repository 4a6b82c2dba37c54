//! Error type definitions for identity resolution and token management
//!
//! Display strings are developer-facing; the presentation layer maps each
//! variant to a stable client error code.

use thiserror::Error;

/// Identity resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed payload, wrong issuer, empty credential or
    /// an expired token where expiry is not tolerated
    #[error("Invalid token")]
    TokenInvalid,

    /// The credential is past its expiry; the caller must log in again
    #[error("Token expired")]
    TokenExpired,

    /// No refresh token is stored for the identity
    #[error("Refresh token not found")]
    RefreshTokenMissing,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Failed to load signing keys: {message}")]
    KeyLoadError { message: String },
}
