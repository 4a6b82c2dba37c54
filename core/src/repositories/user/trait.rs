//! User repository trait defining the identity lookups the token lifecycle needs.

use async_trait::async_trait;

use crate::domain::entities::user::Identity;
use crate::errors::DomainError;

/// Repository trait for identity persistence keyed by external identity
///
/// The token lifecycle only reads identities; `save_profile` exists for the
/// login flow that registers users on first sight.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an identity by the provider-assigned identifier
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - Identity found
    /// * `Ok(None)` - No identity with that identifier
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_external_id(&self, external_id: &str)
        -> Result<Option<Identity>, DomainError>;

    /// Check whether an identity exists
    async fn exists_by_external_id(&self, external_id: &str) -> Result<bool, DomainError>;

    /// Register the identity or refresh its display name
    ///
    /// New identities receive baseline roles. Existing roles are untouched.
    async fn save_profile(
        &self,
        external_id: &str,
        display_name: &str,
    ) -> Result<Identity, DomainError>;
}
