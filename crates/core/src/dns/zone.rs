//! Zones and Records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dns::RecordType;

/// Provider zone id
pub type ZoneId = i64;

/// Provider record id
pub type RecordId = i64;

/// A DNS record within a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    /// Provider record id.
    pub id: RecordId,

    /// Record type.
    #[serde(rename = "Type")]
    pub record_type: RecordType,

    /// Record name, relative to the zone.
    #[serde(default)]
    pub name: String,

    /// Record value.
    #[serde(default)]
    pub value: String,

    /// Remaining provider fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A DNS zone, optionally including its records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Zone {
    /// Provider zone id.
    pub id: ZoneId,

    /// Apex domain of the zone.
    #[serde(default)]
    pub domain: String,

    /// Records in the zone.
    #[serde(default)]
    pub records: Vec<Record>,

    /// Remaining provider fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Zone {
    /// Find a record in this zone by id.
    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }
}

/// A page of zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListZonesResponse {
    /// Page number reported by the provider.
    #[serde(default)]
    pub current_page: i64,

    /// Total number of zones across all pages.
    #[serde(default)]
    pub total_items: i64,

    /// Whether further pages exist.
    #[serde(default)]
    pub has_more_items: bool,

    /// Zones on this page.
    #[serde(default)]
    pub items: Vec<Zone>,
}

/// Optional paging and search parameters for listing zones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListZonesOptions {
    /// Page number, starting at 1.
    pub page: Option<u32>,

    /// Zones per page.
    pub per_page: Option<u32>,

    /// Domain search term.
    pub search: Option<String>,
}

/// Body of an add or update record request. Only the type is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRequest {
    /// Record type being written.
    #[serde(rename = "Type")]
    pub record_type: RecordType,

    /// Remaining request fields, forwarded untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
