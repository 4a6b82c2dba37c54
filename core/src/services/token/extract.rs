//! Helpers for raw credentials

use crate::errors::{DomainError, TokenError};

const BEARER_PREFIX: &str = "Bearer ";

/// Strips the `Bearer ` scheme from an `Authorization` header value
///
/// Values without the scheme are taken as the bare token. An empty result is
/// `TokenInvalid`.
pub fn extract_bearer(raw: &str) -> Result<&str, DomainError> {
    let raw = raw.trim_start();
    let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw).trim();

    if token.is_empty() {
        return Err(DomainError::Token(TokenError::TokenInvalid));
    }
    Ok(token)
}

/// Shortens a subject for log output
pub fn mask_subject(subject: &str) -> String {
    let visible: String = subject.chars().take(4).collect();
    format!("{}***", visible)
}
