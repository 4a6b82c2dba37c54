//! MySQL repository integration tests
//!
//! These need a reachable MySQL server:
//! `DATABASE_URL=mysql://... cargo test -p dm_infra -- --ignored`

use dm_core::repositories::{RefreshTokenStore, UserRepository};
use dm_infra::{DatabasePool, MySqlRefreshTokenStore, MySqlUserRepository};
use dm_shared::config::DatabaseConfig;

async fn pool() -> DatabasePool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for MySQL tests");

    let pool = DatabasePool::new(DatabaseConfig::new(url).with_max_connections(4))
        .await
        .expect("Failed to connect to MySQL");
    pool.run_migrations().await.expect("Failed to run migrations");
    pool
}

fn unique_provider_id() -> String {
    format!("test_{}", uuid::Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore]
async fn test_save_profile_registers_then_updates() {
    let pool = pool().await;
    let users = MySqlUserRepository::new(pool.get_pool().clone());
    let provider_id = unique_provider_id();

    assert!(!users.exists_by_external_id(&provider_id).await.unwrap());

    let created = users.save_profile(&provider_id, "first").await.unwrap();
    let updated = users.save_profile(&provider_id, "second").await.unwrap();

    assert_eq!(created.id, updated.id);
    assert_eq!(updated.display_name, "second");
    assert_eq!(updated.roles.authorities(), vec!["ROLE_USER".to_string()]);
    assert!(users.exists_by_external_id(&provider_id).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_refresh_slot_lifecycle() {
    let pool = pool().await;
    let users = MySqlUserRepository::new(pool.get_pool().clone());
    let store = MySqlRefreshTokenStore::new(pool.get_pool().clone());
    let owner = users
        .save_profile(&unique_provider_id(), "slot")
        .await
        .unwrap()
        .id;

    store.upsert(owner, "token-a", 1_000).await.unwrap();
    store.upsert(owner, "token-b", 2_000).await.unwrap();

    let record = store.find(owner).await.unwrap().unwrap();
    assert_eq!(record.token, "token-b");
    assert_eq!(record.ttl, 2_000);

    assert!(!store.replace(owner, "token-a", "token-c", 3_000).await.unwrap());
    assert!(store.replace(owner, "token-b", "token-c", 3_000).await.unwrap());
    assert_eq!(store.find(owner).await.unwrap().unwrap().token, "token-c");

    assert!(!store.replace(owner, "TOKEN-C", "token-d", 4_000).await.unwrap());
    assert!(!store.delete_if(owner, "token-b").await.unwrap());
    assert!(!store.delete_if(owner, "TOKEN-C").await.unwrap());
    assert_eq!(store.find(owner).await.unwrap().unwrap().token, "token-c");

    assert!(store.delete(owner).await.unwrap());
    assert!(!store.delete(owner).await.unwrap());
    assert!(store.find(owner).await.unwrap().is_none());

    store.upsert(owner, "token-e", 5_000).await.unwrap();
    assert!(store.delete_if(owner, "token-e").await.unwrap());
    assert!(store.find(owner).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let pool = pool().await;
    assert!(pool.health_check().await.unwrap());
}
