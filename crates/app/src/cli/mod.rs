use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sqlx::SqlitePool;
use zonegate_app::{crypto::EncryptionKey, database};

mod master_key;
mod permission;
mod token;

#[derive(Debug, Parser)]
#[command(name = "zonegate-app", about = "Zonegate token administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Token(token::TokenCommand),
    Permission(permission::PermissionCommand),
    MasterKey(master_key::MasterKeyCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Token(command) => token::run(command).await,
            Commands::Permission(command) => permission::run(command).await,
            Commands::MasterKey(command) => master_key::run(command).await,
        }
    }
}

/// Location of the proxy database.
#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    /// Path to the SQLite database file
    #[arg(long, env = "DATA_PATH", default_value = "/data/proxy.db")]
    data_path: PathBuf,
}

impl StoreArgs {
    pub(crate) async fn open(&self) -> Result<SqlitePool, String> {
        database::connect(&self.data_path).await.map_err(|error| {
            format!(
                "failed to open database {}: {error}",
                self.data_path.display()
            )
        })
    }
}

/// Key protecting the master credential.
#[derive(Debug, Args)]
pub(crate) struct KeyArgs {
    /// 32-byte key used to encrypt the master credential
    #[arg(long, env = "ENCRYPTION_KEY", hide_env_values = true)]
    encryption_key: String,
}

impl KeyArgs {
    pub(crate) fn key(&self) -> Result<EncryptionKey, String> {
        EncryptionKey::from_bytes(self.encryption_key.as_bytes())
            .map_err(|error| format!("invalid ENCRYPTION_KEY: {error}"))
    }
}
