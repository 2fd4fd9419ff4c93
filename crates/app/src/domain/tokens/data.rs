//! Token Data

use zonegate_core::{actions::Action, dns::ZoneId};

use crate::crypto::Secret;

/// New Token Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToken {
    /// Human-readable name.
    pub name: String,

    /// Whether the token has full access.
    pub is_admin: bool,

    /// Raw secret presented by clients. Only its digest is persisted.
    pub secret: Secret,

    /// Grants created together with the token.
    pub permissions: Vec<NewPermission>,
}

/// New Permission Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermission {
    /// Zone id, `0` for every zone.
    pub zone_id: ZoneId,

    /// Actions granted.
    pub allowed_actions: Vec<Action>,

    /// Record type names, empty for every type.
    pub record_types: Vec<String>,
}
