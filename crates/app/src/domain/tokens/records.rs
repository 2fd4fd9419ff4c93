//! Token Records

use jiff::Timestamp;
use zonegate_core::{
    actions::Action,
    ids::{PermissionId, TokenId},
    permissions::{Permission, ZoneScope},
};

use crate::crypto::HashedSecret;

/// Token Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    /// Row id.
    pub id: TokenId,

    /// Human-readable name.
    pub name: String,

    /// Digest of the secret.
    pub token_hash: HashedSecret,

    /// Whether the token has full access.
    pub is_admin: bool,

    /// Creation timestamp.
    pub created_at: Timestamp,
}

/// Permission Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRecord {
    /// Row id.
    pub id: PermissionId,

    /// Owning token.
    pub token_id: TokenId,

    /// Zone id, `0` for every zone.
    pub zone_id: i64,

    /// Granted actions.
    pub allowed_actions: Vec<Action>,

    /// Granted record type names.
    pub record_types: Vec<String>,

    /// Creation timestamp.
    pub created_at: Timestamp,
}

impl From<PermissionRecord> for Permission {
    fn from(record: PermissionRecord) -> Self {
        Self {
            id: record.id,
            token_id: record.token_id,
            zone: ZoneScope::from_raw(record.zone_id),
            allowed_actions: record.allowed_actions,
            record_types: record.record_types,
        }
    }
}

/// A token together with its permission rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDetails {
    pub token: TokenRecord,
    pub permissions: Vec<PermissionRecord>,
}
