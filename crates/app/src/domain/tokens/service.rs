//! Tokens service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::SqlitePool;
use tracing::{info, warn};
use zonegate_core::{
    dns::RecordType,
    identity::{Identity, ScopedIdentity},
    ids::{PermissionId, TokenId},
    permissions::Permission,
};

use crate::{
    crypto::HashedSecret,
    domain::tokens::{
        data::{NewPermission, NewToken},
        errors::TokensServiceError,
        records::{PermissionRecord, TokenDetails, TokenRecord},
        repository::SqliteTokensRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteTokensService {
    repository: SqliteTokensRepository,
}

impl SqliteTokensService {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: SqliteTokensRepository::new(pool),
        }
    }
}

#[async_trait]
impl TokensService for SqliteTokensService {
    async fn create_token(&self, token: NewToken) -> Result<TokenRecord, TokensServiceError> {
        let name = token.name.trim();

        if name.is_empty() {
            return Err(TokensServiceError::InvalidInput("name is required"));
        }

        if token.secret.is_blank() {
            return Err(TokensServiceError::InvalidInput("secret is required"));
        }

        if token.is_admin && !token.permissions.is_empty() {
            return Err(TokensServiceError::AdminToken);
        }

        let permissions = token
            .permissions
            .into_iter()
            .map(validate_permission)
            .collect::<Result<Vec<_>, _>>()?;

        // Secrets are matched trimmed.
        let hash = HashedSecret::digest(token.secret.expose().trim());

        let mut tx = self.repository.begin().await?;

        let created = self
            .repository
            .create_token(&mut tx, name, &hash, token.is_admin)
            .await?;

        for permission in &permissions {
            self.repository
                .create_permission(&mut tx, created.id, permission)
                .await?;
        }

        tx.commit().await?;

        info!(
            token_id = %created.id,
            is_admin = created.is_admin,
            permissions = permissions.len(),
            "created token"
        );

        Ok(created)
    }

    async fn validate_token(&self, secret: &str) -> Result<Identity, TokensServiceError> {
        let hash = HashedSecret::digest(secret.trim());

        let token = self
            .repository
            .find_token_by_hash(&hash)
            .await?
            .ok_or(TokensServiceError::NotFound)?;

        if token.is_admin {
            return Ok(Identity::Admin);
        }

        let permissions = self
            .repository
            .list_permissions(token.id)
            .await?
            .into_iter()
            .map(Permission::from)
            .collect();

        Ok(Identity::Scoped(ScopedIdentity::new(
            token.id,
            token.name,
            permissions,
        )))
    }

    async fn list_tokens(&self) -> Result<Vec<TokenRecord>, TokensServiceError> {
        self.repository.list_tokens().await.map_err(Into::into)
    }

    async fn get_token(&self, id: TokenId) -> Result<TokenDetails, TokensServiceError> {
        let token = self.repository.get_token(id).await?;
        let permissions = self.repository.list_permissions(id).await?;

        Ok(TokenDetails { token, permissions })
    }

    async fn delete_token(&self, id: TokenId) -> Result<(), TokensServiceError> {
        let mut tx = self.repository.begin().await?;

        let token = self
            .repository
            .find_token(&mut tx, id)
            .await?
            .ok_or(TokensServiceError::NotFound)?;

        // At least one admin token must remain once the proxy is configured.
        if token.is_admin && self.repository.count_admin_tokens(&mut tx).await? <= 1 {
            warn!(token_id = %id, "refused to delete the last admin token");

            return Err(TokensServiceError::LastAdmin);
        }

        let rows_affected = self.repository.delete_token(&mut tx, id).await?;

        if rows_affected == 0 {
            return Err(TokensServiceError::NotFound);
        }

        tx.commit().await?;

        info!(token_id = %id, is_admin = token.is_admin, "deleted token");

        Ok(())
    }

    async fn add_permission(
        &self,
        token: TokenId,
        permission: NewPermission,
    ) -> Result<PermissionRecord, TokensServiceError> {
        let owner = self.repository.get_token(token).await?;

        if owner.is_admin {
            return Err(TokensServiceError::AdminToken);
        }

        let permission = validate_permission(permission)?;

        let mut tx = self.repository.begin().await?;
        let created = self
            .repository
            .create_permission(&mut tx, token, &permission)
            .await?;
        tx.commit().await?;

        info!(
            token_id = %token,
            permission_id = %created.id,
            zone_id = created.zone_id,
            "added permission"
        );

        Ok(created)
    }

    async fn delete_permission(
        &self,
        token: TokenId,
        permission: PermissionId,
    ) -> Result<(), TokensServiceError> {
        let rows_affected = self.repository.delete_permission(token, permission).await?;

        if rows_affected == 0 {
            return Err(TokensServiceError::PermissionNotFound);
        }

        info!(token_id = %token, permission_id = %permission, "deleted permission");

        Ok(())
    }

    async fn has_admin_token(&self) -> Result<bool, TokensServiceError> {
        self.repository.has_admin_token().await.map_err(Into::into)
    }
}

/// Reject malformed grants and store record types under their canonical names.
fn validate_permission(permission: NewPermission) -> Result<NewPermission, TokensServiceError> {
    if permission.zone_id < 0 {
        return Err(TokensServiceError::InvalidInput("zone_id must be 0 or a positive zone id"));
    }

    if permission.allowed_actions.is_empty() {
        return Err(TokensServiceError::InvalidInput("at least one action is required"));
    }

    let mut allowed_actions = Vec::with_capacity(permission.allowed_actions.len());

    for action in permission.allowed_actions {
        if !allowed_actions.contains(&action) {
            allowed_actions.push(action);
        }
    }

    let mut record_types: Vec<String> = Vec::with_capacity(permission.record_types.len());

    for name in &permission.record_types {
        let record_type = RecordType::from_name(name)
            .ok_or(TokensServiceError::InvalidInput("unknown record type"))?;

        let canonical = record_type.name().to_string();

        if !record_types.contains(&canonical) {
            record_types.push(canonical);
        }
    }

    Ok(NewPermission {
        zone_id: permission.zone_id,
        allowed_actions,
        record_types,
    })
}

#[automock]
#[async_trait]
/// Access token and permission persistence.
pub trait TokensService: Send + Sync {
    /// Create a token, and any grants it carries, in one transaction.
    async fn create_token(&self, token: NewToken) -> Result<TokenRecord, TokensServiceError>;

    /// Resolve a raw secret to the identity it authenticates as.
    async fn validate_token(&self, secret: &str) -> Result<Identity, TokensServiceError>;

    /// List tokens, newest first.
    async fn list_tokens(&self) -> Result<Vec<TokenRecord>, TokensServiceError>;

    /// Fetch a token with its permissions.
    async fn get_token(&self, id: TokenId) -> Result<TokenDetails, TokensServiceError>;

    /// Delete a token and, through the foreign key, its permissions.
    ///
    /// The last remaining admin token cannot be deleted.
    async fn delete_token(&self, id: TokenId) -> Result<(), TokensServiceError>;

    /// Grant a scoped token access to a zone.
    async fn add_permission(
        &self,
        token: TokenId,
        permission: NewPermission,
    ) -> Result<PermissionRecord, TokensServiceError>;

    /// Revoke a single grant.
    async fn delete_permission(
        &self,
        token: TokenId,
        permission: PermissionId,
    ) -> Result<(), TokensServiceError>;

    /// Whether any admin token exists yet.
    async fn has_admin_token(&self) -> Result<bool, TokensServiceError>;
}
