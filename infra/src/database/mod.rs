//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and embedded migrations
//! - The MySQL refresh token store
//! - The MySQL user repository

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::{MySqlRefreshTokenStore, MySqlUserRepository};
