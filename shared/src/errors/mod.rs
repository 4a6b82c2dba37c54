//! Shared error response structure and error codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Error codes returned to clients
///
/// The prefixes follow the domain of the failure: `JWT_` for credential
/// problems, `USER_` for identity resolution and `COMMON_` for the rest.
pub mod error_codes {
    pub const BAD_REQUEST: &str = "COMMON_400";
    pub const INTERNAL_ERROR: &str = "COMMON_500";
    pub const USER_NOT_FOUND: &str = "USER_4041";
    pub const REFRESH_TOKEN_MISSING: &str = "JWT_4041";
    pub const TOKEN_INVALID: &str = "JWT_4032";
    pub const TOKEN_EXPIRED: &str = "JWT_4011";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}
