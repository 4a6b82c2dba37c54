//! Main token service implementation

use std::sync::Arc;

use chrono::Utc;
use constant_time_eq::constant_time_eq;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::Identity;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{RefreshTokenStore, UserRepository};

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::extract::{extract_bearer, mask_subject};

/// Service owning the token lifecycle of every identity
///
/// Each identity holds at most one refresh token, kept in the refresh store.
/// Issuance creates or overwrites that slot, reissue rotates it and logout
/// clears it.
pub struct TokenService<U: UserRepository, S: RefreshTokenStore> {
    users: Arc<U>,
    store: Arc<S>,
    codec: TokenCodec,
    config: TokenServiceConfig,
}

impl<U: UserRepository, S: RefreshTokenStore> TokenService<U, S> {
    /// Creates a new token service instance
    ///
    /// # Errors
    ///
    /// `KeyLoadError` when RS256 is configured and the keys cannot be loaded.
    pub fn new(users: Arc<U>, store: Arc<S>, config: TokenServiceConfig) -> DomainResult<Self> {
        let codec = TokenCodec::new(&config)?;
        Ok(Self::with_codec(users, store, codec, config))
    }

    /// Creates a token service around an already constructed codec
    pub fn with_codec(
        users: Arc<U>,
        store: Arc<S>,
        codec: TokenCodec,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            users,
            store,
            codec,
            config,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Signs a fresh pair for `identity` without touching the store
    ///
    /// The access half embeds the identity's roles, the refresh half none.
    /// `ttl` is the refresh expiry in epoch milliseconds.
    pub fn mint(&self, identity: &Identity) -> DomainResult<TokenPair> {
        let now = Utc::now();
        let access_expiry = now + self.config.access_token_lifetime();
        let refresh_expiry = now + self.config.refresh_token_lifetime();

        let access_token =
            self.codec
                .issue(&identity.external_id, Some(&identity.roles), access_expiry)?;
        let refresh_token = self.codec.issue(&identity.external_id, None, refresh_expiry)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            refresh_expiry.timestamp_millis(),
        ))
    }

    /// Issues a pair and stores its refresh half as the identity's only slot
    ///
    /// The store write completes before the pair is returned.
    pub async fn issue_for(&self, identity: &Identity) -> DomainResult<TokenPair> {
        let pair = self.mint(identity)?;

        self.store
            .upsert(identity.id, &pair.refresh_token, pair.ttl)
            .await?;

        tracing::info!(
            subject = %mask_subject(&identity.external_id),
            owner_key = identity.id,
            "Issued token pair"
        );
        Ok(pair)
    }

    /// Issues a pair for a known external identity
    ///
    /// # Errors
    ///
    /// `UserNotFound` before any token is minted.
    pub async fn issue_tokens(&self, external_id: &str) -> DomainResult<TokenPair> {
        let identity = self.resolve_identity(external_id).await?;
        self.issue_for(&identity).await
    }

    /// Registers or refreshes the user's profile and issues a pair
    pub async fn login(&self, external_id: &str, display_name: &str) -> DomainResult<TokenPair> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(DomainError::Validation {
                message: "provider_id must not be blank".to_string(),
            });
        }

        let identity = self.users.save_profile(external_id, display_name).await?;
        self.issue_for(&identity).await
    }

    /// Rotates the refresh slot using a possibly expired access token
    ///
    /// # Errors
    ///
    /// * `TokenInvalid` - empty header, bad signature or no subject
    /// * `UserNotFound` - the subject no longer resolves
    /// * `RefreshTokenMissing` - no slot, or the slot changed concurrently
    /// * `TokenExpired` - the stored refresh token is no longer valid; the
    ///   slot is cleared unless another write replaced it meanwhile
    pub async fn reissue_tokens(&self, raw_header: &str) -> DomainResult<TokenPair> {
        self.rotate(raw_header, None).await
    }

    /// Rotation that also requires the caller to present the stored refresh token
    ///
    /// A presented token that differs from the stored one is `TokenInvalid`
    /// and leaves the slot untouched.
    pub async fn reissue_with_refresh(
        &self,
        raw_header: &str,
        presented_refresh: &str,
    ) -> DomainResult<TokenPair> {
        let presented_refresh = presented_refresh.trim();
        if presented_refresh.is_empty() {
            return Err(DomainError::Token(TokenError::TokenInvalid));
        }
        self.rotate(raw_header, Some(presented_refresh)).await
    }

    async fn rotate(&self, raw_header: &str, presented: Option<&str>) -> DomainResult<TokenPair> {
        let token = extract_bearer(raw_header)?;
        let claims = self.codec.parse_allow_expired(token).map_err(|e| {
            tracing::warn!("Reissue rejected: access token failed verification");
            e
        })?;
        let identity = self.identity_from_claims(&claims).await?;
        let subject = mask_subject(&identity.external_id);

        let record = self
            .store
            .find(identity.id)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshTokenMissing))?;

        if let Some(presented) = presented {
            if !constant_time_eq(presented.as_bytes(), record.token.as_bytes()) {
                tracing::warn!(subject = %subject, "Presented refresh token does not match the stored one");
                return Err(DomainError::Token(TokenError::TokenInvalid));
            }
        }

        if !self.codec.validate(&record.token) {
            let cleared = self.store.delete_if(identity.id, &record.token).await?;
            tracing::warn!(subject = %subject, cleared, "Stored refresh token invalid");
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        let pair = self.mint(&identity)?;
        let swapped = self
            .store
            .replace(identity.id, &record.token, &pair.refresh_token, pair.ttl)
            .await?;

        if !swapped {
            tracing::warn!(subject = %subject, "Refresh slot changed during rotation");
            return Err(DomainError::Token(TokenError::RefreshTokenMissing));
        }

        tracing::info!(subject = %subject, owner_key = identity.id, "Rotated token pair");
        Ok(pair)
    }

    /// Clears the identity's refresh slot
    ///
    /// Succeeds whether or not a slot existed. The access token must be
    /// strictly valid.
    pub async fn revoke(&self, raw_header: &str) -> DomainResult<()> {
        let token = extract_bearer(raw_header)?;
        let claims = self.codec.parse_strict(token)?;
        let identity = self.identity_from_claims(&claims).await?;

        let removed = self.store.delete(identity.id).await?;
        self.store.flush().await?;

        tracing::info!(
            subject = %mask_subject(&identity.external_id),
            removed,
            "Revoked refresh token"
        );
        Ok(())
    }

    /// Strictly verifies an access token from an `Authorization` header value
    ///
    /// Expiry is reported as `TokenExpired`, every other defect as
    /// `TokenInvalid`.
    pub fn verify_access_token(&self, raw_header: &str) -> DomainResult<Claims> {
        let token = extract_bearer(raw_header)?;
        self.codec.verify_access(token)
    }

    pub async fn check_identity_exists(&self, external_id: &str) -> DomainResult<bool> {
        self.users.exists_by_external_id(external_id).await
    }

    async fn identity_from_claims(&self, claims: &Claims) -> DomainResult<Identity> {
        if claims.sub.trim().is_empty() {
            return Err(DomainError::Token(TokenError::TokenInvalid));
        }
        self.resolve_identity(&claims.sub).await
    }

    async fn resolve_identity(&self, external_id: &str) -> DomainResult<Identity> {
        self.users
            .find_by_external_id(external_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }
}
