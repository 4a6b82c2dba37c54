//! Access token authentication for protected endpoints
//!
//! Handlers that take an [`AuthContext`] argument only run for requests
//! carrying a strictly valid access token in the `Authorization` header.
//! Verification goes through the [`AccessTokenVerifier`] registered in the
//! application data, so the extractor does not depend on the concrete
//! repository types behind the token service.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use dm_core::{
    domain::{Claims, Roles},
    errors::{DomainError, DomainResult, TokenError},
    repositories::{RefreshTokenStore, UserRepository},
    services::token::TokenService,
};

use crate::handlers::error::ApiError;

/// Trait for wrapping TokenService to allow dynamic dispatch
pub trait AccessTokenVerifier: Send + Sync {
    /// Strictly verifies the raw `Authorization` header value
    fn verify_access_token(&self, raw_header: &str) -> DomainResult<Claims>;
}

impl<U: UserRepository, S: RefreshTokenStore> AccessTokenVerifier for TokenService<U, S> {
    fn verify_access_token(&self, raw_header: &str) -> DomainResult<Claims> {
        TokenService::verify_access_token(self, raw_header)
    }
}

/// Authenticated caller injected into handlers
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// External identity from the `sub` claim
    pub provider_id: String,
    /// Authorities restored from the access token
    pub roles: Roles,
    /// JWT ID for tracking
    pub jti: String,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            roles: claims.roles(),
            provider_id: claims.sub,
            jti: claims.jti,
        }
    }

    fn authenticate(req: &HttpRequest) -> Result<Self, DomainError> {
        let verifier = req
            .app_data::<web::Data<dyn AccessTokenVerifier>>()
            .ok_or_else(|| DomainError::internal("access token verifier is not configured"))?;

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(DomainError::Token(TokenError::TokenInvalid))?;

        verifier.verify_access_token(header).map(Self::from_claims)
    }
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::authenticate(req).map_err(ApiError::from))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, ResponseError};
    use chrono::{Duration, Utc};
    use dm_core::{
        domain::Identity,
        repositories::{InMemoryRefreshTokenStore, InMemoryUserRepository},
        services::token::TokenServiceConfig,
    };

    use super::*;

    type Service = TokenService<InMemoryUserRepository, InMemoryRefreshTokenStore>;

    fn service() -> Arc<Service> {
        let config = TokenServiceConfig {
            jwt_secret: "extractor-test-secret".to_string(),
            ..TokenServiceConfig::default()
        };
        Arc::new(
            TokenService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryRefreshTokenStore::new()),
                config,
            )
            .unwrap(),
        )
    }

    fn verifier_data(service: Arc<Service>) -> web::Data<dyn AccessTokenVerifier> {
        let verifier: Arc<dyn AccessTokenVerifier> = service;
        web::Data::from(verifier)
    }

    fn status_of(result: Result<AuthContext, ApiError>) -> StatusCode {
        result.unwrap_err().status_code()
    }

    #[actix_web::test]
    async fn test_valid_token_yields_context() {
        let service = service();
        let identity = Identity::new(1, "kakao_42", "dev");
        let pair = service.mint(&identity).unwrap();

        let req = test::TestRequest::default()
            .app_data(verifier_data(service))
            .insert_header((AUTHORIZATION, format!("Bearer {}", pair.access_token)))
            .to_http_request();

        let context = AuthContext::extract(&req).await.unwrap();
        assert_eq!(context.provider_id, "kakao_42");
        assert_eq!(context.roles.authorities(), vec!["ROLE_USER".to_string()]);
        assert!(!context.jti.is_empty());
    }

    #[actix_web::test]
    async fn test_missing_header_is_forbidden() {
        let req = test::TestRequest::default()
            .app_data(verifier_data(service()))
            .to_http_request();

        assert_eq!(status_of(AuthContext::extract(&req).await), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_expired_token_is_unauthorized() {
        let service = service();
        let expired = service
            .codec()
            .issue("kakao_42", None, Utc::now() - Duration::minutes(5))
            .unwrap();

        let req = test::TestRequest::default()
            .app_data(verifier_data(service))
            .insert_header((AUTHORIZATION, format!("Bearer {}", expired)))
            .to_http_request();

        assert_eq!(status_of(AuthContext::extract(&req).await), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_missing_verifier_is_internal_error() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer anything"))
            .to_http_request();

        assert_eq!(
            status_of(AuthContext::extract(&req).await),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
