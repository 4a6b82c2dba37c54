//! Refresh token store trait defining the single-slot persistence contract.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshRecord;
use crate::errors::DomainError;

/// Persistence of the one refresh token each identity may hold
///
/// Every operation on a given owner must be linearizable with every other
/// operation on the same owner. Implementations guarantee that no sequence
/// of calls leaves two records for one owner.
///
/// # Example
/// ```no_run
/// # use dm_core::repositories::RefreshTokenStore;
/// # async fn example(store: &impl RefreshTokenStore) -> Result<(), dm_core::errors::DomainError> {
/// store.upsert(42, "refresh.jwt.value", 1_700_000_000_000).await?;
///
/// if let Some(record) = store.find(42).await? {
///     println!("slot expires at {}", record.ttl);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Look up the stored record for an owner
    ///
    /// # Returns
    /// * `Ok(Some(RefreshRecord))` - A token is stored
    /// * `Ok(None)` - The slot is empty
    /// * `Err(DomainError)` - Storage failure
    async fn find(&self, owner_key: i64) -> Result<Option<RefreshRecord>, DomainError>;

    /// Create the record or overwrite it in place
    async fn upsert(&self, owner_key: i64, token: &str, ttl: i64) -> Result<(), DomainError>;

    /// Compare-and-swap the stored token
    ///
    /// Writes `new_token` only when the slot currently holds `expected`.
    ///
    /// # Returns
    /// * `Ok(true)` - The slot was swapped
    /// * `Ok(false)` - The slot is absent or holds another token
    /// * `Err(DomainError)` - Storage failure
    async fn replace(
        &self,
        owner_key: i64,
        expected: &str,
        new_token: &str,
        ttl: i64,
    ) -> Result<bool, DomainError>;

    /// Remove the record
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - Nothing was stored
    /// * `Err(DomainError)` - Storage failure
    async fn delete(&self, owner_key: i64) -> Result<bool, DomainError>;

    /// Remove the record only while it still holds `expected`
    ///
    /// # Returns
    /// * `Ok(true)` - The matching record was removed
    /// * `Ok(false)` - The slot is absent or holds another token
    /// * `Err(DomainError)` - Storage failure
    async fn delete_if(&self, owner_key: i64, expected: &str) -> Result<bool, DomainError>;

    /// Make preceding writes visible to subsequent reads
    async fn flush(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
