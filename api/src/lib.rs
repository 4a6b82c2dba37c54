//! HTTP adapter for the DevMarket token lifecycle
//!
//! Exposes issuance, reissue, logout and identity lookups over actix-web.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
