//! Success response envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard success envelope wrapping handler payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always true for this envelope; failures use `ErrorResponse`
    pub success: bool,

    /// Short success code such as `USER_201`
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload with a success code and message
    pub fn success(code: impl Into<String>, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            code: code.into(),
            message: message.into(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }
}

/// Success codes returned to clients
pub mod success_codes {
    pub const OK: &str = "COMMON_200";
    pub const USER_LOGIN: &str = "USER_201";
    pub const USER_REISSUE: &str = "USER_200";
    pub const USER_LOGOUT: &str = "USER_200";
}
