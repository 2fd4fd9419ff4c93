//! Server configuration module

use clap::Parser;

use crate::config::{
    database::DatabaseConfig, encryption::EncryptionConfig, logging::LoggingConfig,
    server::ServerRuntimeConfig, upstream::UpstreamConfig,
};

pub(crate) mod database;
pub(crate) mod encryption;
pub(crate) mod logging;
pub(crate) mod server;
pub(crate) mod upstream;

pub(crate) use logging::LogFormat;

/// Zonegate JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "zonegate-json", about = "Zonegate DNS API proxy", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Token store settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Master credential encryption settings.
    #[command(flatten)]
    pub encryption: EncryptionConfig,

    /// bunny.net API settings.
    #[command(flatten)]
    pub upstream: UpstreamConfig,
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
