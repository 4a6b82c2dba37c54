//! Mapping from domain errors to HTTP error responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use dm_core::errors::{AuthError, DomainError, TokenError};
use dm_shared::errors::{error_codes, ErrorResponse};

/// Status, client code and message for a domain error
fn describe(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Token(token_error) => match token_error {
            TokenError::TokenInvalid => (
                StatusCode::FORBIDDEN,
                error_codes::TOKEN_INVALID,
                "Invalid token".to_string(),
            ),
            TokenError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_EXPIRED,
                "Token has expired, please log in again".to_string(),
            ),
            TokenError::RefreshTokenMissing => (
                StatusCode::NOT_FOUND,
                error_codes::REFRESH_TOKEN_MISSING,
                "Refresh token not found".to_string(),
            ),
            TokenError::TokenGenerationFailed | TokenError::KeyLoadError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "An internal error occurred".to_string(),
            ),
        },
        DomainError::Auth(AuthError::UserNotFound) => (
            StatusCode::NOT_FOUND,
            error_codes::USER_NOT_FOUND,
            "User not found".to_string(),
        ),
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::BAD_REQUEST,
            message.clone(),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code, message) = describe(error);

    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::debug!(error = %error, code, "Request rejected");
    }

    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// Domain error usable as an actix error, for extractors
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError(error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        describe(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_statuses() {
        let cases = [
            (TokenError::TokenInvalid, StatusCode::FORBIDDEN),
            (TokenError::TokenExpired, StatusCode::UNAUTHORIZED),
            (TokenError::RefreshTokenMissing, StatusCode::NOT_FOUND),
            (TokenError::TokenGenerationFailed, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            let response = handle_domain_error(&DomainError::Token(error));
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_codes_for_non_token_errors() {
        assert_eq!(
            describe(&DomainError::Auth(AuthError::UserNotFound)).1,
            "USER_4041"
        );
        assert_eq!(
            describe(&DomainError::Validation {
                message: "blank".to_string()
            }),
            (StatusCode::BAD_REQUEST, "COMMON_400", "blank".to_string())
        );
        assert_eq!(describe(&DomainError::internal("db down")).1, "COMMON_500");
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let (_, _, message) = describe(&DomainError::internal("connection refused"));
        assert!(!message.contains("connection refused"));
    }

    #[test]
    fn test_api_error_status() {
        let error = ApiError::from(DomainError::Token(TokenError::TokenExpired));
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    }
}
