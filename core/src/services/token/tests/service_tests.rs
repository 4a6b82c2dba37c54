//! Unit tests for token service

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::user::{Identity, Roles};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{
    InMemoryRefreshTokenStore, InMemoryUserRepository, RefreshTokenStore, UserRepository,
};
use crate::services::token::{TokenService, TokenServiceConfig};

type Service = TokenService<InMemoryUserRepository, InMemoryRefreshTokenStore>;

async fn setup() -> (Service, Arc<InMemoryUserRepository>, Arc<InMemoryRefreshTokenStore>) {
    let users = Arc::new(InMemoryUserRepository::new());
    users.insert(Identity::new(1, "kakao_1", "dev")).await;

    let store = Arc::new(InMemoryRefreshTokenStore::new());
    let service =
        TokenService::new(users.clone(), store.clone(), TokenServiceConfig::default()).unwrap();
    (service, users, store)
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn test_issue_tokens_stores_refresh_half() {
    let (service, _, store) = setup().await;

    let pair = service.issue_tokens("kakao_1").await.unwrap();

    let record = store.find(1).await.unwrap().unwrap();
    assert_eq!(record.token, pair.refresh_token);
    assert_eq!(record.ttl, pair.ttl);
    assert_ne!(pair.access_token, pair.refresh_token);
}

#[tokio::test]
async fn test_ttl_is_refresh_expiry_in_millis() {
    let (service, _, _) = setup().await;
    let before = Utc::now().timestamp_millis();

    let pair = service.issue_tokens("kakao_1").await.unwrap();

    let lifetime_ms = service.config().refresh_token_expiry_secs * 1000;
    assert!(pair.ttl >= before + lifetime_ms - 1000);
    assert!(pair.ttl <= Utc::now().timestamp_millis() + lifetime_ms);
}

#[tokio::test]
async fn test_access_token_carries_roles_refresh_does_not() {
    let (service, users, _) = setup().await;
    users
        .insert(Identity::new(2, "kakao_2", "admin").with_roles(Roles::explicit(vec!["ROLE_ADMIN"])))
        .await;

    let pair = service.issue_tokens("kakao_2").await.unwrap();

    let access = service.codec().parse_strict(&pair.access_token).unwrap();
    assert_eq!(access.authorities.as_deref(), Some("ROLE_ADMIN"));

    let refresh = service.codec().parse_strict(&pair.refresh_token).unwrap();
    assert!(refresh.authorities.is_none());
}

#[tokio::test]
async fn test_issue_for_unknown_identity() {
    let (service, _, store) = setup().await;

    let result = service.issue_tokens("nobody").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserNotFound))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_reissue_rotates_both_halves() {
    let (service, _, store) = setup().await;
    let first = service.issue_tokens("kakao_1").await.unwrap();

    let second = service.reissue_tokens(&bearer(&first.access_token)).await.unwrap();

    assert_ne!(first.access_token, second.access_token);
    assert_ne!(first.refresh_token, second.refresh_token);
    assert_eq!(store.find(1).await.unwrap().unwrap().token, second.refresh_token);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_reissue_accepts_expired_access_token() {
    let (service, _, _) = setup().await;
    service.issue_tokens("kakao_1").await.unwrap();

    let expired_access = service
        .codec()
        .issue("kakao_1", Some(&Roles::DefaultBaseline), Utc::now() - Duration::hours(1))
        .unwrap();

    assert!(service.reissue_tokens(&bearer(&expired_access)).await.is_ok());
}

#[tokio::test]
async fn test_reissue_without_stored_refresh() {
    let (service, _, _) = setup().await;
    let pair = service.mint(&Identity::new(1, "kakao_1", "dev")).unwrap();

    let result = service.reissue_tokens(&bearer(&pair.access_token)).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshTokenMissing))
    ));
}

#[tokio::test]
async fn test_reissue_clears_expired_stored_refresh() {
    let (service, _, store) = setup().await;
    let pair = service.issue_tokens("kakao_1").await.unwrap();

    let stale = service
        .codec()
        .issue("kakao_1", None, Utc::now() - Duration::hours(1))
        .unwrap();
    store.upsert(1, &stale, Utc::now().timestamp_millis() - 1).await.unwrap();

    let result = service.reissue_tokens(&bearer(&pair.access_token)).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::TokenExpired))));
    assert!(store.find(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_reissue_rejects_blank_header() {
    let (service, _, _) = setup().await;

    for raw in ["", "Bearer "] {
        let result = service.reissue_tokens(raw).await;
        assert!(matches!(result, Err(DomainError::Token(TokenError::TokenInvalid))));
    }
}

#[tokio::test]
async fn test_reissue_for_deleted_identity() {
    let (service, users, _) = setup().await;
    let pair = service.issue_tokens("kakao_1").await.unwrap();
    users.remove("kakao_1").await;

    let result = service.reissue_tokens(&bearer(&pair.access_token)).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserNotFound))));
}

#[tokio::test]
async fn test_reissue_with_matching_refresh() {
    let (service, _, store) = setup().await;
    let pair = service.issue_tokens("kakao_1").await.unwrap();

    let rotated = service
        .reissue_with_refresh(&bearer(&pair.access_token), &pair.refresh_token)
        .await
        .unwrap();

    assert_eq!(store.find(1).await.unwrap().unwrap().token, rotated.refresh_token);
}

#[tokio::test]
async fn test_reissue_with_mismatched_refresh_leaves_slot() {
    let (service, _, store) = setup().await;
    let pair = service.issue_tokens("kakao_1").await.unwrap();
    let other = service.mint(&Identity::new(1, "kakao_1", "dev")).unwrap();

    let result = service
        .reissue_with_refresh(&bearer(&pair.access_token), &other.refresh_token)
        .await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::TokenInvalid))));

    let blank = service.reissue_with_refresh(&bearer(&pair.access_token), " ").await;
    assert!(matches!(blank, Err(DomainError::Token(TokenError::TokenInvalid))));

    assert_eq!(store.find(1).await.unwrap().unwrap().token, pair.refresh_token);
}

#[tokio::test]
async fn test_revoke_requires_valid_access_token() {
    let (service, _, store) = setup().await;
    service.issue_tokens("kakao_1").await.unwrap();

    let expired_access = service
        .codec()
        .issue("kakao_1", None, Utc::now() - Duration::hours(1))
        .unwrap();

    let result = service.revoke(&bearer(&expired_access)).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::TokenInvalid))));
    assert!(store.find(1).await.unwrap().is_some());
}

#[tokio::test]
async fn test_revoke_twice_succeeds() {
    let (service, _, store) = setup().await;
    let pair = service.issue_tokens("kakao_1").await.unwrap();

    service.revoke(&bearer(&pair.access_token)).await.unwrap();
    service.revoke(&pair.access_token).await.unwrap();
    assert!(store.find(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_registers_and_issues() {
    let (service, users, store) = setup().await;

    let pair = service.login("kakao_9", "newbie").await.unwrap();

    let identity = users.find_by_external_id("kakao_9").await.unwrap().unwrap();
    assert_eq!(store.find(identity.id).await.unwrap().unwrap().token, pair.refresh_token);
    assert!(service.check_identity_exists("kakao_9").await.unwrap());
}

#[tokio::test]
async fn test_login_rejects_blank_provider_id() {
    let (service, _, _) = setup().await;

    let result = service.login("  ", "nobody").await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_verify_access_token() {
    let (service, _, _) = setup().await;
    let pair = service.issue_tokens("kakao_1").await.unwrap();

    let claims = service.verify_access_token(&bearer(&pair.access_token)).unwrap();
    assert_eq!(claims.sub, "kakao_1");
    assert_eq!(claims.roles(), Roles::DefaultBaseline);

    let expired = service
        .codec()
        .issue("kakao_1", None, Utc::now() - Duration::hours(1))
        .unwrap();
    assert!(matches!(
        service.verify_access_token(&bearer(&expired)),
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_new_rejects_unsupported_algorithm() {
    let config = TokenServiceConfig {
        algorithm: jsonwebtoken::Algorithm::ES256,
        ..TokenServiceConfig::default()
    };

    let result = Service::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryRefreshTokenStore::new()),
        config,
    );
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::KeyLoadError { .. }))
    ));
}
