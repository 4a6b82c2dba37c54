//! # DevMarket Core
//!
//! Token lifecycle domain layer for the DevMarket backend.
//! This crate contains the identity and token entities, the refresh store and
//! user repository interfaces, the JWT codec and the token service that
//! issues, rotates and revokes credential pairs.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Claims, Identity, RefreshRecord, Roles, TokenPair, BASELINE_AUTHORITY};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{
    InMemoryRefreshTokenStore, InMemoryUserRepository, RefreshTokenStore, UserRepository,
};
pub use services::{
    extract_bearer, mask_subject, Rs256KeyManager, TokenCodec, TokenService, TokenServiceConfig,
};
