//! HTTP bind settings: `SERVER_HOST`, `SERVER_PORT`, `SERVER_WORKERS`

use serde::{Deserialize, Serialize};

use super::env_value;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// actix worker count; 0 keeps the framework default of one per core
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 8080)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            workers: 0,
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_value("SERVER_HOST").unwrap_or(defaults.host),
            port: env_value("SERVER_PORT").unwrap_or(defaults.port),
            workers: env_value("SERVER_WORKERS").unwrap_or(defaults.workers),
        }
    }

    /// `host:port` for `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
