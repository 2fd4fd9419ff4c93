//! Prelude

pub use crate::{
    access::{
        AccessError, AccessRequest, check_permission, require_admin, requires_existing_record_check,
    },
    actions::{Action, ActionParseError},
    dns::{
        ListZonesOptions, ListZonesResponse, Record, RecordId, RecordRequest, RecordType, Zone,
        ZoneId,
    },
    filter::{filter_records, filter_zone, filter_zone_list},
    identity::{Identity, ScopedIdentity},
    ids::{PermissionId, TokenId},
    permissions::{ALL_ZONES, Permission, RecordTypeFilter, ZoneScope},
};
