//! Credentials service errors.

use sqlx::Error;
use thiserror::Error;

use crate::crypto::CryptoError;

#[derive(Debug, Error)]
pub enum CredentialsServiceError {
    #[error("master credential is not configured")]
    NotConfigured,

    #[error("master credential could not be decrypted")]
    DecryptionFailed(#[source] CryptoError),

    #[error("master credential must not be empty")]
    InvalidInput,

    #[error("failed to encrypt master credential")]
    Encryption(#[source] CryptoError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CredentialsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotConfigured;
        }

        Self::Sql(error)
    }
}
