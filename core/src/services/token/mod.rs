//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - JWT signing and parsing, strict or expiry-tolerant
//! - Issuance of access/refresh pairs into the single refresh slot
//! - Rotation of the refresh slot on reissue
//! - Revocation on logout
//! - RS256 key loading for asymmetric signing

mod codec;
mod config;
mod extract;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use extract::{extract_bearer, mask_subject};
pub use key_manager::Rs256KeyManager;
pub use service::TokenService;
