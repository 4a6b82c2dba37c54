//! In-memory refresh token store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshRecord;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenStore;

/// Refresh token store backed by a map behind a single async lock
///
/// Each operation takes the lock once, so operations on one owner never
/// interleave. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenStore {
    records: Arc<RwLock<HashMap<i64, RefreshRecord>>>,
}

impl InMemoryRefreshTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn find(&self, owner_key: i64) -> Result<Option<RefreshRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&owner_key).cloned())
    }

    async fn upsert(&self, owner_key: i64, token: &str, ttl: i64) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(owner_key, RefreshRecord::new(owner_key, token, ttl));
        tracing::debug!(owner_key, "Refresh slot written");
        Ok(())
    }

    async fn replace(
        &self,
        owner_key: i64,
        expected: &str,
        new_token: &str,
        ttl: i64,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(&owner_key) {
            Some(record) if record.token == expected => {
                record.token = new_token.to_string();
                record.ttl = ttl;
                tracing::debug!(owner_key, "Refresh slot rotated");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, owner_key: i64) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(&owner_key).is_some())
    }

    async fn delete_if(&self, owner_key: i64, expected: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get(&owner_key) {
            Some(record) if record.token == expected => {
                records.remove(&owner_key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
