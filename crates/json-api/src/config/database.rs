//! Database Config

use std::path::PathBuf;

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[arg(long, env = "DATA_PATH", default_value = "/data/proxy.db")]
    pub data_path: PathBuf,
}
