//! Response Filtering
//!
//! Narrows upstream responses to what an identity is allowed to observe. Admins always see the
//! response unmodified.

use crate::{
    dns::{ListZonesResponse, Record, Zone, ZoneId},
    identity::Identity,
};

/// Keep only the zones a scoped identity holds a row for.
///
/// An identity holding the all-zones sentinel gets the page untouched. Otherwise the total is
/// rewritten to the filtered count and paging stops.
#[must_use]
pub fn filter_zone_list(identity: &Identity, mut response: ListZonesResponse) -> ListZonesResponse {
    let Some(scoped) = identity.as_scoped() else {
        return response;
    };

    if scoped.has_all_zones() {
        return response;
    }

    response.items.retain(|zone| scoped.covers_zone(zone.id));
    response.total_items = i64::try_from(response.items.len()).unwrap_or(i64::MAX);
    response.has_more_items = false;

    response
}

/// Strip the records of a zone the identity may not see.
#[must_use]
pub fn filter_zone(identity: &Identity, mut zone: Zone) -> Zone {
    let records = std::mem::take(&mut zone.records);
    zone.records = filter_records(identity, zone.id, records);

    zone
}

/// Keep only records whose type name is visible to the identity in the zone.
#[must_use]
pub fn filter_records(identity: &Identity, zone_id: ZoneId, mut records: Vec<Record>) -> Vec<Record> {
    let Some(scoped) = identity.as_scoped() else {
        return records;
    };

    let visible = scoped.visible_record_types(zone_id);

    if visible.is_restricted() {
        records.retain(|record| visible.permits_type(record.record_type));
    }

    records
}
