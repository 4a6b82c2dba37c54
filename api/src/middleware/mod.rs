pub mod auth;

pub use auth::{AccessTokenVerifier, AuthContext};
