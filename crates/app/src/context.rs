//! App Context

use std::{path::Path, sync::Arc};

use thiserror::Error;

use crate::{
    auth::{AuthService, StoreAuthService},
    crypto::EncryptionKey,
    database::{self, Db},
    domain::{
        credentials::{CredentialsService, SqliteCredentialsService},
        tokens::{SqliteTokensService, TokensService},
    },
    provider::{BunnyClient, BunnyConfig, DnsProvider, ProviderError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open database")]
    Database(#[source] sqlx::Error),

    #[error("failed to build upstream client")]
    Provider(#[source] ProviderError),
}

#[derive(Clone)]
pub struct AppContext {
    pub db: Db,
    pub tokens: Arc<dyn TokensService>,
    pub credentials: Arc<dyn CredentialsService>,
    pub auth: Arc<dyn AuthService>,
    pub provider: Arc<dyn DnsProvider>,
}

impl AppContext {
    /// Build application context from the database path, encryption key and upstream settings.
    ///
    /// # Errors
    ///
    /// Returns an error when opening or migrating the database fails, or the upstream client
    /// cannot be built.
    pub async fn from_config(
        data_path: &Path,
        key: EncryptionKey,
        bunny: BunnyConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(data_path)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        let tokens: Arc<dyn TokensService> = Arc::new(SqliteTokensService::new(pool.clone()));
        let credentials: Arc<dyn CredentialsService> =
            Arc::new(SqliteCredentialsService::new(pool, key));

        let provider =
            BunnyClient::new(bunny, credentials.clone()).map_err(AppInitError::Provider)?;

        Ok(Self {
            auth: Arc::new(StoreAuthService::new(tokens.clone(), credentials.clone())),
            provider: Arc::new(provider),
            db,
            tokens,
            credentials,
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}
