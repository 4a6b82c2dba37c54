//! In-memory user repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::Identity;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

#[derive(Default)]
struct Inner {
    users: HashMap<String, Identity>,
    next_id: i64,
}

/// User repository keeping identities in a map; ids are assigned sequentially
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an identity as-is
    pub async fn insert(&self, identity: Identity) {
        let mut inner = self.inner.write().await;
        inner.next_id = inner.next_id.max(identity.id);
        inner.users.insert(identity.external_id.clone(), identity);
    }

    /// Remove an identity, returning it if present
    pub async fn remove(&self, external_id: &str) -> Option<Identity> {
        self.inner.write().await.users.remove(external_id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<Identity>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(external_id).cloned())
    }

    async fn exists_by_external_id(&self, external_id: &str) -> Result<bool, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.users.contains_key(external_id))
    }

    async fn save_profile(
        &self,
        external_id: &str,
        display_name: &str,
    ) -> Result<Identity, DomainError> {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.users.get_mut(external_id) {
            existing.display_name = display_name.to_string();
            return Ok(existing.clone());
        }

        inner.next_id += 1;
        let identity = Identity::new(inner.next_id, external_id, display_name);
        inner.users.insert(external_id.to_string(), identity.clone());
        Ok(identity)
    }
}
