//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, logging::LoggingConfig, notifications::NotificationsConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod notifications;
pub(crate) mod server;

/// Tradepost JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "tradepost-json", about = "Tradepost JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Outbound notification settings.
    #[command(flatten)]
    pub notifications: NotificationsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
