//! Identity
//!
//! The authenticated caller of a single request.

use serde::Serialize;

use crate::{
    actions::Action,
    dns::ZoneId,
    ids::TokenId,
    permissions::{Permission, RecordTypeFilter, ZoneScope},
};

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    /// Full access, either an admin token or the master credential during bootstrap.
    Admin,

    /// A token limited to its permission rows.
    Scoped(ScopedIdentity),
}

impl Identity {
    /// Whether this identity has full access.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// The scoped identity, if any.
    #[must_use]
    pub const fn as_scoped(&self) -> Option<&ScopedIdentity> {
        match self {
            Self::Admin => None,
            Self::Scoped(scoped) => Some(scoped),
        }
    }
}

/// A scoped token together with every permission row it held when it authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedIdentity {
    /// Token id.
    pub token_id: TokenId,

    /// Token name.
    pub name: String,

    /// Permission rows.
    pub permissions: Vec<Permission>,
}

impl ScopedIdentity {
    /// Create a scoped identity.
    #[must_use]
    pub fn new(token_id: TokenId, name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            token_id,
            name: name.into(),
            permissions,
        }
    }

    /// Whether any row carries the all-zones sentinel.
    #[must_use]
    pub fn has_all_zones(&self) -> bool {
        self.permissions
            .iter()
            .any(|permission| permission.zone == ZoneScope::All)
    }

    /// Whether any row applies to the zone.
    #[must_use]
    pub fn covers_zone(&self, zone_id: ZoneId) -> bool {
        self.permissions
            .iter()
            .any(|permission| permission.covers(zone_id))
    }

    /// Rows that apply to the zone.
    pub fn covering(&self, zone_id: ZoneId) -> impl Iterator<Item = &Permission> {
        self.permissions
            .iter()
            .filter(move |permission| permission.covers(zone_id))
    }

    /// Rows that apply to the zone and list the action.
    pub fn granting(&self, zone_id: ZoneId, action: Action) -> impl Iterator<Item = &Permission> {
        self.covering(zone_id)
            .filter(move |permission| permission.allows(action))
    }

    /// Record types visible in the zone, the union over every covering row.
    #[must_use]
    pub fn visible_record_types(&self, zone_id: ZoneId) -> RecordTypeFilter {
        self.covering(zone_id)
            .map(Permission::record_type_filter)
            .collect()
    }

    /// Record types the action may touch in the zone, the union over granting rows.
    #[must_use]
    pub fn granted_record_types(&self, zone_id: ZoneId, action: Action) -> RecordTypeFilter {
        self.granting(zone_id, action)
            .map(Permission::record_type_filter)
            .collect()
    }
}
