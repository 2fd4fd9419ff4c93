//! HTTP error responses.
//!
//! Every failure leaves the API as `{"error": "..."}` with a matching status code. Storage and
//! transport details are logged here and never rendered.

use std::borrow::Cow;

use salvo::{
    http::StatusCode,
    prelude::{Json, Response},
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use zonegate_app::{
    auth::AuthServiceError,
    domain::{credentials::CredentialsServiceError, tokens::TokensServiceError},
    provider::ProviderError,
};
use zonegate_core::access::AccessError;

pub(crate) const UPSTREAM_AUTH_FAILED: &str = "upstream authentication failed";
pub(crate) const CANNOT_DELETE_LAST_ADMIN: &str = "cannot_delete_last_admin";
pub(crate) const MASTER_KEY_LOCKED: &str = "master_key_locked";

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

/// An error rendered as a JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {error}")]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) error: Cow<'static, str>,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, error: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    pub(crate) fn bad_request(error: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub(crate) fn invalid_body() -> Self {
        Self::bad_request("invalid request body")
    }

    pub(crate) fn not_found(error: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorBody {
            error: self.error.into_owned(),
        }));
    }
}

impl From<AccessError> for ApiError {
    fn from(error: AccessError) -> Self {
        Self::new(StatusCode::FORBIDDEN, error.to_string())
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        match error {
            AuthServiceError::MissingKey | AuthServiceError::InvalidKey => {
                Self::new(StatusCode::UNAUTHORIZED, error.to_string())
            }
            AuthServiceError::MasterKeyLocked => {
                Self::new(StatusCode::FORBIDDEN, MASTER_KEY_LOCKED)
            }
            AuthServiceError::Tokens(source) => {
                error!(error = %source, "token lookup failed during authentication");

                Self::internal()
            }
            AuthServiceError::Credentials(source) => {
                error!(error = %source, "master credential lookup failed during authentication");

                Self::internal()
            }
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::NotFound => Self::not_found("resource not found"),
            ProviderError::Unauthorized => {
                warn!("upstream rejected the master credential");

                Self::new(StatusCode::BAD_GATEWAY, UPSTREAM_AUTH_FAILED)
            }
            ProviderError::NotConfigured => {
                warn!("master credential is not configured");

                Self::new(StatusCode::BAD_GATEWAY, UPSTREAM_AUTH_FAILED)
            }
            ProviderError::DecryptionFailed(source) => {
                error!(error = %source, "master credential could not be decrypted");

                Self::new(StatusCode::BAD_GATEWAY, UPSTREAM_AUTH_FAILED)
            }
            ProviderError::Api {
                status,
                error_key,
                message,
                ..
            } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let message = if message.is_empty() { error_key } else { message };

                Self::new(status, message)
            }
            ProviderError::Timeout => {
                warn!("upstream request timed out");

                Self::new(StatusCode::GATEWAY_TIMEOUT, "upstream timeout")
            }
            ProviderError::Transport(source) | ProviderError::Decode(source) => {
                error!(error = %source, "upstream request failed");

                Self::internal()
            }
            ProviderError::Credentials(source) => {
                error!(error = %source, "credential store failed");

                Self::internal()
            }
        }
    }
}

impl From<TokensServiceError> for ApiError {
    fn from(error: TokensServiceError) -> Self {
        match error {
            TokensServiceError::NotFound | TokensServiceError::PermissionNotFound => {
                Self::not_found(error.to_string())
            }
            TokensServiceError::Conflict => Self::new(StatusCode::CONFLICT, error.to_string()),
            TokensServiceError::InvalidInput(message) => Self::bad_request(message),
            TokensServiceError::AdminToken => Self::bad_request(error.to_string()),
            TokensServiceError::LastAdmin => {
                Self::new(StatusCode::CONFLICT, CANNOT_DELETE_LAST_ADMIN)
            }
            TokensServiceError::Sql(source) => {
                error!(error = %source, "token store query failed");

                Self::internal()
            }
        }
    }
}

impl From<CredentialsServiceError> for ApiError {
    fn from(error: CredentialsServiceError) -> Self {
        match error {
            CredentialsServiceError::InvalidInput => Self::bad_request(error.to_string()),
            other => {
                error!(error = %other, "credential store failed");

                Self::internal()
            }
        }
    }
}
