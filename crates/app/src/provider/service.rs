//! Provider trait.

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use zonegate_core::dns::{
    ListZonesOptions, ListZonesResponse, Record, RecordId, RecordRequest, Zone, ZoneId,
};

use crate::provider::ProviderError;

#[automock]
#[async_trait]
/// Operations forwarded to the upstream DNS provider.
pub trait DnsProvider: Send + Sync {
    /// List zones, one page at a time.
    async fn list_zones(&self, options: &ListZonesOptions)
    -> Result<ListZonesResponse, ProviderError>;

    /// Fetch a zone including its records.
    async fn get_zone(&self, zone: ZoneId) -> Result<Zone, ProviderError>;

    /// Create a zone.
    async fn create_zone(&self, body: Value) -> Result<Zone, ProviderError>;

    /// Change zone-level settings.
    async fn update_zone(&self, zone: ZoneId, body: Value) -> Result<Zone, ProviderError>;

    /// Delete a zone.
    async fn delete_zone(&self, zone: ZoneId) -> Result<(), ProviderError>;

    /// Check whether a domain can be added as a zone.
    async fn check_availability(&self, body: Value) -> Result<Value, ProviderError>;

    /// Import records from a zone file.
    async fn import_records(
        &self,
        zone: ZoneId,
        body: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<Value, ProviderError>;

    /// Export the zone as a zone file.
    async fn export_records(&self, zone: ZoneId) -> Result<String, ProviderError>;

    /// Enable or disable DNSSEC.
    async fn set_dnssec(&self, zone: ZoneId, enabled: bool) -> Result<Value, ProviderError>;

    /// Issue a wildcard certificate for the zone.
    async fn issue_certificate(&self, zone: ZoneId, body: Value) -> Result<(), ProviderError>;

    /// Add a record.
    async fn add_record(&self, zone: ZoneId, record: RecordRequest)
    -> Result<Record, ProviderError>;

    /// Update a record. The provider may answer without a body.
    async fn update_record(
        &self,
        zone: ZoneId,
        record: RecordId,
        body: RecordRequest,
    ) -> Result<Option<Record>, ProviderError>;

    /// Delete a record.
    async fn delete_record(&self, zone: ZoneId, record: RecordId) -> Result<(), ProviderError>;
}
