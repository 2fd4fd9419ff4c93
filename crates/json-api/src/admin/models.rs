//! Admin API payloads.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use zonegate_app::domain::tokens::records::{PermissionRecord, TokenDetails, TokenRecord};
use zonegate_core::{
    actions::Action,
    dns::ZoneId,
    identity::ScopedIdentity,
    ids::{PermissionId, TokenId},
    permissions::Permission,
};

/// A token as listed by the admin API. The hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TokenResponse {
    pub id: TokenId,
    pub name: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

impl From<TokenRecord> for TokenResponse {
    fn from(token: TokenRecord) -> Self {
        Self {
            id: token.id,
            name: token.name,
            is_admin: token.is_admin,
            created_at: token.created_at,
        }
    }
}

/// A freshly created token, including its secret. The secret is not retrievable later.
#[derive(Serialize, Deserialize)]
pub(crate) struct CreatedTokenResponse {
    #[serde(flatten)]
    pub token: TokenResponse,
    pub token_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PermissionResponse {
    pub id: PermissionId,
    pub token_id: TokenId,
    pub zone_id: ZoneId,
    pub allowed_actions: Vec<Action>,
    pub record_types: Vec<String>,
    pub created_at: Timestamp,
}

impl From<PermissionRecord> for PermissionResponse {
    fn from(permission: PermissionRecord) -> Self {
        Self {
            id: permission.id,
            token_id: permission.token_id,
            zone_id: permission.zone_id,
            allowed_actions: permission.allowed_actions,
            record_types: permission.record_types,
            created_at: permission.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TokenDetailsResponse {
    #[serde(flatten)]
    pub token: TokenResponse,
    pub permissions: Vec<PermissionResponse>,
}

impl From<TokenDetails> for TokenDetailsResponse {
    fn from(details: TokenDetails) -> Self {
        Self {
            token: details.token.into(),
            permissions: details.permissions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create Token Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreateTokenRequest {
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    /// One permission row is created per zone.
    #[serde(default)]
    pub zones: Vec<ZoneId>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub record_types: Vec<String>,
}

/// Add Permission Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreatePermissionRequest {
    pub zone_id: ZoneId,
    #[serde(default)]
    pub allowed_actions: Vec<Action>,
    #[serde(default)]
    pub record_types: Vec<String>,
}

/// Replace Master Key Request
#[derive(Serialize, Deserialize)]
pub(crate) struct MasterKeyRequest {
    pub api_key: String,
}

/// A grant as held by the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GrantResponse {
    pub id: PermissionId,
    pub zone_id: ZoneId,
    pub allowed_actions: Vec<Action>,
    pub record_types: Vec<String>,
}

impl From<&Permission> for GrantResponse {
    fn from(permission: &Permission) -> Self {
        Self {
            id: permission.id,
            zone_id: permission.zone.as_raw(),
            allowed_actions: permission.allowed_actions.clone(),
            record_types: permission.record_types.clone(),
        }
    }
}

/// The caller's identity.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WhoamiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<TokenId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_admin: bool,
    pub is_master_key: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<GrantResponse>,
}

impl WhoamiResponse {
    pub(crate) fn admin(is_master_key: bool) -> Self {
        Self {
            token_id: None,
            name: None,
            is_admin: true,
            is_master_key,
            permissions: Vec::new(),
        }
    }

    pub(crate) fn scoped(identity: &ScopedIdentity) -> Self {
        Self {
            token_id: Some(identity.token_id),
            name: Some(identity.name.clone()),
            is_admin: false,
            is_master_key: false,
            permissions: identity.permissions.iter().map(Into::into).collect(),
        }
    }
}
