//! Domain entities representing core business objects.

pub mod token;
pub mod user;

pub use token::{Claims, RefreshRecord, TokenPair};
pub use user::{Identity, Roles, BASELINE_AUTHORITY};
