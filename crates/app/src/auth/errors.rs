//! Auth service errors.

use thiserror::Error;

use crate::domain::{credentials::CredentialsServiceError, tokens::TokensServiceError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("missing API key")]
    MissingKey,

    #[error("invalid API key")]
    InvalidKey,

    #[error("master credential is locked once an admin token exists")]
    MasterKeyLocked,

    #[error("token lookup failed")]
    Tokens(#[source] TokensServiceError),

    #[error("master credential lookup failed")]
    Credentials(#[source] CredentialsServiceError),
}

impl From<TokensServiceError> for AuthServiceError {
    fn from(error: TokensServiceError) -> Self {
        Self::Tokens(error)
    }
}

impl From<CredentialsServiceError> for AuthServiceError {
    fn from(error: CredentialsServiceError) -> Self {
        Self::Credentials(error)
    }
}
