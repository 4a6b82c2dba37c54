//! Domain layer containing the identity and token entities.

pub mod entities;

pub use entities::{Claims, Identity, RefreshRecord, Roles, TokenPair, BASELINE_AUTHORITY};
