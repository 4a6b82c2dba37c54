//! Route handlers
//!
//! - `auth` - token issuance, reissue and logout
//! - `users` - identity lookups

pub mod auth;
pub mod users;

use std::sync::Arc;

use actix_web::{http::header::AUTHORIZATION, HttpRequest};
use dm_core::{
    repositories::{RefreshTokenStore, UserRepository},
    services::token::TokenService,
};

/// Application state shared across all handlers
pub struct AppState<U, S>
where
    U: UserRepository,
    S: RefreshTokenStore,
{
    pub token_service: Arc<TokenService<U, S>>,
}

impl<U, S> AppState<U, S>
where
    U: UserRepository,
    S: RefreshTokenStore,
{
    pub fn new(token_service: Arc<TokenService<U, S>>) -> Self {
        Self { token_service }
    }
}

/// Raw `Authorization` header value, empty when absent or not ASCII
pub(crate) fn authorization_header(req: &HttpRequest) -> &str {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
