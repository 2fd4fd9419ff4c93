//! Provider errors.

use thiserror::Error;

use crate::domain::credentials::CredentialsServiceError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("resource not found")]
    NotFound,

    #[error("upstream rejected the master credential")]
    Unauthorized,

    #[error("master credential is not configured")]
    NotConfigured,

    #[error("master credential could not be decrypted")]
    DecryptionFailed(#[source] CredentialsServiceError),

    #[error("upstream error {status} {error_key}: {message}")]
    Api {
        status: u16,
        error_key: String,
        field: String,
        message: String,
    },

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream request failed")]
    Transport(#[source] reqwest::Error),

    #[error("upstream response could not be decoded")]
    Decode(#[source] reqwest::Error),

    #[error("credential store error")]
    Credentials(#[source] CredentialsServiceError),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }

        if error.is_decode() {
            return Self::Decode(error);
        }

        Self::Transport(error)
    }
}

impl From<CredentialsServiceError> for ProviderError {
    fn from(error: CredentialsServiceError) -> Self {
        match error {
            CredentialsServiceError::NotConfigured => Self::NotConfigured,
            CredentialsServiceError::DecryptionFailed(_) => Self::DecryptionFailed(error),
            other => Self::Credentials(other),
        }
    }
}
