//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};
use zonegate_core::identity::Identity;

use crate::{
    auth::{AuthServiceError, BootstrapState},
    domain::{
        credentials::{CredentialsService, CredentialsServiceError},
        tokens::{TokensService, TokensServiceError},
    },
};

/// Authenticates secrets against stored tokens, falling back to the master credential while no
/// admin token exists.
#[derive(Clone)]
pub struct StoreAuthService {
    tokens: Arc<dyn TokensService>,
    credentials: Arc<dyn CredentialsService>,
}

impl StoreAuthService {
    #[must_use]
    pub fn new(tokens: Arc<dyn TokensService>, credentials: Arc<dyn CredentialsService>) -> Self {
        Self {
            tokens,
            credentials,
        }
    }

    /// Compare a secret that matched no token against the master credential.
    ///
    /// The master credential authenticates as admin only while unconfigured; afterwards it is
    /// reported as locked rather than invalid.
    async fn authenticate_master(&self, secret: &str) -> Result<Identity, AuthServiceError> {
        let state = self.bootstrap_state().await?;

        let master = match self.credentials.get_master_credential().await {
            Ok(master) => master,
            Err(CredentialsServiceError::NotConfigured) => return Err(AuthServiceError::InvalidKey),
            Err(error) if !state.accepts_master_credential() => {
                warn!(error = %error, "master credential unavailable after bootstrap");

                return Err(AuthServiceError::InvalidKey);
            }
            Err(error) => return Err(error.into()),
        };

        if !master.matches(secret) {
            return Err(AuthServiceError::InvalidKey);
        }

        if !state.accepts_master_credential() {
            warn!("master credential presented after bootstrap");

            return Err(AuthServiceError::MasterKeyLocked);
        }

        info!("authenticated with master credential during bootstrap");

        Ok(Identity::Admin)
    }
}

impl std::fmt::Debug for StoreAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAuthService").finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for StoreAuthService {
    async fn authenticate(&self, secret: &str) -> Result<Identity, AuthServiceError> {
        let secret = secret.trim();

        if secret.is_empty() {
            return Err(AuthServiceError::MissingKey);
        }

        match self.tokens.validate_token(secret).await {
            Ok(identity) => Ok(identity),
            Err(TokensServiceError::NotFound) => self.authenticate_master(secret).await,
            Err(error) => {
                warn!(error = %error, "token lookup failed");

                Err(error.into())
            }
        }
    }

    async fn bootstrap_state(&self) -> Result<BootstrapState, AuthServiceError> {
        let admin_exists = self.tokens.has_admin_token().await?;

        Ok(BootstrapState::from_admin_exists(admin_exists))
    }
}

#[automock]
#[async_trait]
/// Maps inbound secrets to identities.
pub trait AuthService: Send + Sync {
    /// Authenticate a raw secret taken from the request.
    async fn authenticate(&self, secret: &str) -> Result<Identity, AuthServiceError>;

    /// Current bootstrap state.
    async fn bootstrap_state(&self) -> Result<BootstrapState, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        crypto::{CryptoError, Secret},
        domain::{
            credentials::MockCredentialsService,
            tokens::{MockTokensService, data::NewToken},
        },
        test::TestContext,
    };

    use super::*;

    fn service(tokens: MockTokensService, credentials: MockCredentialsService) -> StoreAuthService {
        StoreAuthService::new(Arc::new(tokens), Arc::new(credentials))
    }

    #[tokio::test]
    async fn empty_secret_is_missing_without_lookup() {
        let mut tokens = MockTokensService::new();
        tokens.expect_validate_token().never();

        let result = service(tokens, MockCredentialsService::new())
            .authenticate("   ")
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::MissingKey)),
            "expected MissingKey, got {result:?}"
        );
    }

    #[tokio::test]
    async fn token_match_skips_bootstrap() -> TestResult {
        let mut tokens = MockTokensService::new();
        tokens
            .expect_validate_token()
            .once()
            .withf(|secret| secret == "admin-secret")
            .return_once(|_| Ok(Identity::Admin));
        tokens.expect_has_admin_token().never();

        let mut credentials = MockCredentialsService::new();
        credentials.expect_get_master_credential().never();

        let identity = service(tokens, credentials).authenticate("admin-secret").await?;

        assert_eq!(identity, Identity::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn master_credential_is_admin_while_unconfigured() -> TestResult {
        let mut tokens = MockTokensService::new();
        tokens
            .expect_validate_token()
            .once()
            .return_once(|_| Err(TokensServiceError::NotFound));
        tokens.expect_has_admin_token().once().return_once(|| Ok(false));

        let mut credentials = MockCredentialsService::new();
        credentials
            .expect_get_master_credential()
            .once()
            .return_once(|| Ok(Secret::new("bunny-master-key")));

        let identity = service(tokens, credentials)
            .authenticate("bunny-master-key")
            .await?;

        assert_eq!(identity, Identity::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn master_credential_is_locked_once_configured() {
        let mut tokens = MockTokensService::new();
        tokens
            .expect_validate_token()
            .once()
            .return_once(|_| Err(TokensServiceError::NotFound));
        tokens.expect_has_admin_token().once().return_once(|| Ok(true));

        let mut credentials = MockCredentialsService::new();
        credentials
            .expect_get_master_credential()
            .once()
            .return_once(|| Ok(Secret::new("bunny-master-key")));

        let result = service(tokens, credentials)
            .authenticate("bunny-master-key")
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::MasterKeyLocked)),
            "expected MasterKeyLocked, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_secret_stays_invalid_once_configured() {
        let mut tokens = MockTokensService::new();
        tokens
            .expect_validate_token()
            .once()
            .return_once(|_| Err(TokensServiceError::NotFound));
        tokens.expect_has_admin_token().once().return_once(|| Ok(true));

        let mut credentials = MockCredentialsService::new();
        credentials
            .expect_get_master_credential()
            .once()
            .return_once(|| Ok(Secret::new("bunny-master-key")));

        let result = service(tokens, credentials).authenticate("guess").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidKey)),
            "expected InvalidKey, got {result:?}"
        );
    }

    #[tokio::test]
    async fn undecryptable_master_is_invalid_once_configured() {
        let mut tokens = MockTokensService::new();
        tokens
            .expect_validate_token()
            .once()
            .return_once(|_| Err(TokensServiceError::NotFound));
        tokens.expect_has_admin_token().once().return_once(|| Ok(true));

        let mut credentials = MockCredentialsService::new();
        credentials
            .expect_get_master_credential()
            .once()
            .return_once(|| {
                Err(CredentialsServiceError::DecryptionFailed(
                    CryptoError::DecryptionFailed,
                ))
            });

        let result = service(tokens, credentials).authenticate("guess").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidKey)),
            "expected InvalidKey, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_secret_is_invalid_when_master_is_unset() {
        let mut tokens = MockTokensService::new();
        tokens
            .expect_validate_token()
            .once()
            .return_once(|_| Err(TokensServiceError::NotFound));
        tokens.expect_has_admin_token().once().return_once(|| Ok(false));

        let mut credentials = MockCredentialsService::new();
        credentials
            .expect_get_master_credential()
            .once()
            .return_once(|| Err(CredentialsServiceError::NotConfigured));

        let result = service(tokens, credentials).authenticate("guess").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidKey)),
            "expected InvalidKey, got {result:?}"
        );
    }

    #[tokio::test]
    async fn non_matching_secret_is_invalid_during_bootstrap() {
        let mut tokens = MockTokensService::new();
        tokens
            .expect_validate_token()
            .once()
            .return_once(|_| Err(TokensServiceError::NotFound));
        tokens.expect_has_admin_token().once().return_once(|| Ok(false));

        let mut credentials = MockCredentialsService::new();
        credentials
            .expect_get_master_credential()
            .once()
            .return_once(|| Ok(Secret::new("bunny-master-key")));

        let result = service(tokens, credentials).authenticate("bunny-master-kez").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidKey)),
            "expected InvalidKey, got {result:?}"
        );
    }

    #[tokio::test]
    async fn undecryptable_master_surfaces_as_error() {
        let mut tokens = MockTokensService::new();
        tokens
            .expect_validate_token()
            .once()
            .return_once(|_| Err(TokensServiceError::NotFound));
        tokens.expect_has_admin_token().once().return_once(|| Ok(false));

        let mut credentials = MockCredentialsService::new();
        credentials
            .expect_get_master_credential()
            .once()
            .return_once(|| {
                Err(CredentialsServiceError::DecryptionFailed(
                    CryptoError::DecryptionFailed,
                ))
            });

        let result = service(tokens, credentials).authenticate("anything").await;

        assert!(
            matches!(
                result,
                Err(AuthServiceError::Credentials(CredentialsServiceError::DecryptionFailed(_)))
            ),
            "expected a credentials error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn master_credential_stays_locked_after_refused_admin_delete() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.credentials.set_master_credential("bunny-master-key").await?;

        let auth = StoreAuthService::new(
            Arc::new(ctx.tokens.clone()),
            Arc::new(ctx.credentials.clone()),
        );

        assert_eq!(auth.authenticate("bunny-master-key").await?, Identity::Admin);

        let root = ctx
            .tokens
            .create_token(NewToken {
                name: "root".to_string(),
                is_admin: true,
                secret: Secret::new("root-secret"),
                permissions: Vec::new(),
            })
            .await?;

        let refused = ctx.tokens.delete_token(root.id).await;

        assert!(
            matches!(refused, Err(TokensServiceError::LastAdmin)),
            "expected LastAdmin, got {refused:?}"
        );
        assert_eq!(auth.bootstrap_state().await?, BootstrapState::Configured);

        let result = auth.authenticate("bunny-master-key").await;

        assert!(
            matches!(result, Err(AuthServiceError::MasterKeyLocked)),
            "master credential must not regain admin, got {result:?}"
        );

        Ok(())
    }
}
