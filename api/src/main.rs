use std::sync::Arc;

use actix_web::HttpServer;
use anyhow::Context;

use dm_api::{create_app, telemetry};
use dm_core::services::token::{TokenService, TokenServiceConfig};
use dm_infra::{DatabasePool, MySqlRefreshTokenStore, MySqlUserRepository};
use dm_shared::config::{AppConfig, Environment, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logging comes first so configuration warnings are not lost
    telemetry::init_tracing(&LoggingConfig::from_env(Environment::from_env()))?;
    let config = AppConfig::from_env();

    tracing::info!(
        environment = %config.environment,
        "Starting DevMarket API server"
    );

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }

    let users = Arc::new(MySqlUserRepository::new(database.get_pool().clone()));
    let store = Arc::new(MySqlRefreshTokenStore::new(database.get_pool().clone()));
    let token_service = Arc::new(
        TokenService::new(users, store, TokenServiceConfig::from(&config.jwt))
            .context("failed to initialise the token service")?,
    );

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(token_service.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
