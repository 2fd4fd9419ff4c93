//! Credentials service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::SqlitePool;
use tracing::info;

use crate::{
    crypto::{EncryptionKey, Secret},
    domain::credentials::{
        errors::CredentialsServiceError, repository::SqliteCredentialsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCredentialsService {
    repository: SqliteCredentialsRepository,
    key: EncryptionKey,
}

impl SqliteCredentialsService {
    #[must_use]
    pub fn new(pool: SqlitePool, key: EncryptionKey) -> Self {
        Self {
            repository: SqliteCredentialsRepository::new(pool),
            key,
        }
    }
}

#[async_trait]
impl CredentialsService for SqliteCredentialsService {
    async fn set_master_credential(&self, plaintext: &str) -> Result<(), CredentialsServiceError> {
        if plaintext.trim().is_empty() {
            return Err(CredentialsServiceError::InvalidInput);
        }

        let encrypted = self
            .key
            .encrypt(plaintext)
            .map_err(CredentialsServiceError::Encryption)?;

        self.repository.set_master_credential(&encrypted).await?;

        info!("stored master credential");

        Ok(())
    }

    async fn get_master_credential(&self) -> Result<Secret, CredentialsServiceError> {
        let row = self
            .repository
            .get_master_credential()
            .await?
            .ok_or(CredentialsServiceError::NotConfigured)?;

        self.key
            .decrypt(&row.encrypted)
            .map_err(CredentialsServiceError::DecryptionFailed)
    }
}

#[automock]
#[async_trait]
/// Storage of the upstream master credential.
pub trait CredentialsService: Send + Sync {
    /// Encrypt and store the master credential, replacing any previous value.
    async fn set_master_credential(&self, plaintext: &str) -> Result<(), CredentialsServiceError>;

    /// Load and decrypt the master credential. Nothing is cached between calls.
    async fn get_master_credential(&self) -> Result<Secret, CredentialsServiceError>;
}
