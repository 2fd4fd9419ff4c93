//! Permissions
//!
//! A permission grants a token a set of actions on one zone (or on every zone) and
//! limits those actions to a set of record types.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    actions::Action,
    dns::{RecordType, ZoneId},
    ids::{PermissionId, TokenId},
};

/// Zone id that stands for every zone.
pub const ALL_ZONES: ZoneId = 0;

/// Which zones a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneScope {
    /// Every zone on the account.
    All,

    /// A single zone.
    Zone(ZoneId),
}

impl ZoneScope {
    /// Interpret a stored zone id, where `0` means every zone.
    #[must_use]
    pub const fn from_raw(zone_id: ZoneId) -> Self {
        if zone_id == ALL_ZONES {
            Self::All
        } else {
            Self::Zone(zone_id)
        }
    }

    /// The stored representation of this scope.
    #[must_use]
    pub const fn as_raw(self) -> ZoneId {
        match self {
            Self::All => ALL_ZONES,
            Self::Zone(zone_id) => zone_id,
        }
    }

    /// Whether this scope includes the given zone.
    #[must_use]
    pub const fn covers(self, zone_id: ZoneId) -> bool {
        match self {
            Self::All => true,
            Self::Zone(id) => id == zone_id,
        }
    }
}

impl fmt::Display for ZoneScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all zones"),
            Self::Zone(zone_id) => write!(f, "zone {zone_id}"),
        }
    }
}

impl Serialize for ZoneScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_raw())
    }
}

impl<'de> Deserialize<'de> for ZoneScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ZoneId::deserialize(deserializer).map(Self::from_raw)
    }
}

/// A single grant row held by a scoped token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission id.
    pub id: PermissionId,

    /// Owning token.
    pub token_id: TokenId,

    /// Zones the grant applies to.
    #[serde(rename = "zone_id")]
    pub zone: ZoneScope,

    /// Actions allowed on those zones. An empty list grants nothing.
    pub allowed_actions: Vec<Action>,

    /// Record type names the actions are limited to. An empty list allows every type.
    pub record_types: Vec<String>,
}

impl Permission {
    /// Whether this row applies to the given zone.
    #[must_use]
    pub const fn covers(&self, zone_id: ZoneId) -> bool {
        self.zone.covers(zone_id)
    }

    /// Whether this row lists the given action.
    #[must_use]
    pub fn allows(&self, action: Action) -> bool {
        self.allowed_actions.contains(&action)
    }

    /// Record types this row permits.
    #[must_use]
    pub fn record_type_filter(&self) -> RecordTypeFilter {
        if self.record_types.is_empty() {
            return RecordTypeFilter::All;
        }

        RecordTypeFilter::Only(
            self.record_types
                .iter()
                .map(|name| canonical_name(name))
                .collect(),
        )
    }
}

/// The set of record types an identity may see or write in a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordTypeFilter {
    /// Every record type, including ones without a known name.
    All,

    /// Only the named types. An empty set permits nothing.
    Only(FxHashSet<String>),
}

impl RecordTypeFilter {
    /// A filter that permits nothing.
    #[must_use]
    pub fn nothing() -> Self {
        Self::Only(FxHashSet::default())
    }

    /// Whether a record type name is permitted. Unnamed types only pass `All`.
    #[must_use]
    pub fn permits(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => !name.is_empty() && names.contains(&canonical_name(name)),
        }
    }

    /// Whether a record type is permitted.
    #[must_use]
    pub fn permits_type(&self, record_type: RecordType) -> bool {
        self.permits(record_type.name())
    }

    /// Whether this filter restricts anything.
    #[must_use]
    pub const fn is_restricted(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    /// Merge another filter into this one.
    pub fn extend(&mut self, other: Self) {
        match (self, other) {
            (Self::All, _) => {}
            (this, Self::All) => *this = Self::All,
            (Self::Only(names), Self::Only(more)) => names.extend(more),
        }
    }
}

impl FromIterator<RecordTypeFilter> for RecordTypeFilter {
    fn from_iter<I: IntoIterator<Item = RecordTypeFilter>>(iter: I) -> Self {
        iter.into_iter().fold(Self::nothing(), |mut acc, filter| {
            acc.extend(filter);
            acc
        })
    }
}

/// Canonical spelling of a record type name, or the trimmed input when the name is unknown.
fn canonical_name(name: &str) -> String {
    match RecordType::from_name(name) {
        Some(record_type) => record_type.name().to_string(),
        None => name.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn permission(zone_id: ZoneId, record_types: &[&str]) -> Permission {
        Permission {
            id: PermissionId::new(1),
            token_id: TokenId::new(1),
            zone: ZoneScope::from_raw(zone_id),
            allowed_actions: vec![Action::ListRecords],
            record_types: record_types.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn zero_zone_id_covers_every_zone() {
        let scope = ZoneScope::from_raw(0);

        assert_eq!(scope, ZoneScope::All);
        assert!(scope.covers(1), "all-zones scope should cover zone 1");
        assert!(scope.covers(987_654), "all-zones scope should cover any zone");
    }

    #[test]
    fn specific_zone_covers_only_itself() {
        let scope = ZoneScope::from_raw(7);

        assert!(scope.covers(7), "zone 7 scope should cover zone 7");
        assert!(!scope.covers(8), "zone 7 scope should not cover zone 8");
    }

    #[test]
    fn empty_record_types_permit_everything() {
        let filter = permission(1, &[]).record_type_filter();

        assert_eq!(filter, RecordTypeFilter::All);
        assert!(filter.permits(""), "unrestricted filter should permit unnamed types");
    }

    #[test]
    fn restricted_filter_matches_case_insensitively() {
        let filter = permission(1, &["txt", "AAAA"]).record_type_filter();

        assert!(filter.permits("TXT"));
        assert!(filter.permits("aaaa"));
        assert!(!filter.permits("A"), "A was not granted");
        assert!(!filter.permits(""), "unnamed types should never match a restricted set");
    }

    #[test]
    fn union_with_unrestricted_row_is_unrestricted() {
        let filter: RecordTypeFilter = [
            permission(1, &["TXT"]).record_type_filter(),
            permission(0, &[]).record_type_filter(),
        ]
        .into_iter()
        .collect();

        assert_eq!(filter, RecordTypeFilter::All);
    }

    #[test]
    fn union_of_no_rows_permits_nothing() {
        let filter: RecordTypeFilter = std::iter::empty().collect();

        assert!(!filter.permits("A"), "no rows should permit nothing");
    }

    #[test]
    fn zone_scope_serializes_as_raw_id() -> TestResult {
        assert_eq!(serde_json::to_string(&ZoneScope::All)?, "0");
        assert_eq!(serde_json::from_str::<ZoneScope>("12")?, ZoneScope::Zone(12));

        Ok(())
    }
}
