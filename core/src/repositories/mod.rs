//! Repository traits and in-memory implementations

pub mod refresh;
pub mod user;

pub use refresh::{InMemoryRefreshTokenStore, RefreshTokenStore};
pub use user::{InMemoryUserRepository, UserRepository};
