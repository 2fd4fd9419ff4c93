//! Actions
//!
//! The fixed vocabulary of operations a permission row can grant.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An operation against the DNS provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// List zones visible to the caller.
    ListZones,

    /// Read a single zone.
    GetZone,

    /// List the records of a zone.
    ListRecords,

    /// Add a record to a zone.
    AddRecord,

    /// Update an existing record.
    UpdateRecord,

    /// Delete a record.
    DeleteRecord,

    /// Create a new zone (admin only).
    CreateZone,

    /// Change zone-level settings (admin only).
    UpdateZone,
}

/// Raised when a stored or submitted action name is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action: {0}")]
pub struct ActionParseError(pub String);

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::ListZones,
        Self::GetZone,
        Self::ListRecords,
        Self::AddRecord,
        Self::UpdateRecord,
        Self::DeleteRecord,
        Self::CreateZone,
        Self::UpdateZone,
    ];

    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListZones => "list_zones",
            Self::GetZone => "get_zone",
            Self::ListRecords => "list_records",
            Self::AddRecord => "add_record",
            Self::UpdateRecord => "update_record",
            Self::DeleteRecord => "delete_record",
            Self::CreateZone => "create_zone",
            Self::UpdateZone => "update_zone",
        }
    }

    /// Admin-only actions can never be granted to a scoped token.
    #[must_use]
    pub const fn is_admin_only(self) -> bool {
        matches!(self, Self::CreateZone | Self::UpdateZone)
    }

    /// Actions that carry a record type which must itself be permitted.
    #[must_use]
    pub const fn checks_record_type(self) -> bool {
        matches!(self, Self::AddRecord | Self::UpdateRecord)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| ActionParseError(value.to_string()))
    }
}
