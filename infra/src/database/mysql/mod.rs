//! MySQL repository implementations

mod refresh_store_impl;
mod user_repository_impl;

pub use refresh_store_impl::MySqlRefreshTokenStore;
pub use user_repository_impl::MySqlUserRepository;

use dm_core::errors::DomainError;

/// Wraps a driver error as an internal domain error
pub(crate) fn storage_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}
