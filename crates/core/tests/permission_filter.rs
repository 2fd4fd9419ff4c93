//! Response filtering for scoped and admin identities

use serde_json::{Map, json};
use testresult::TestResult;
use zonegate_core::prelude::*;

fn scoped(rows: Vec<(ZoneId, Vec<Action>, Vec<&str>)>) -> Identity {
    let permissions = rows
        .into_iter()
        .enumerate()
        .map(|(index, (zone_id, actions, types))| Permission {
            id: PermissionId::new(i64::try_from(index).unwrap_or_default() + 1),
            token_id: TokenId::new(1),
            zone: ZoneScope::from_raw(zone_id),
            allowed_actions: actions,
            record_types: types.into_iter().map(ToString::to_string).collect(),
        })
        .collect();

    Identity::Scoped(ScopedIdentity::new(TokenId::new(1), "scoped", permissions))
}

fn zone_list() -> TestResult<ListZonesResponse> {
    Ok(serde_json::from_value(json!({
        "CurrentPage": 1,
        "TotalItems": 2,
        "HasMoreItems": true,
        "Items": [
            { "Id": 1, "Domain": "example.com" },
            { "Id": 2, "Domain": "other.com" }
        ]
    }))?)
}

fn zone_with_records() -> TestResult<Zone> {
    Ok(serde_json::from_value(json!({
        "Id": 1,
        "Domain": "example.com",
        "Records": [
            { "Id": 10, "Type": 0, "Name": "www", "Value": "192.0.2.10" },
            { "Id": 11, "Type": 3, "Name": "_acme-challenge", "Value": "token" }
        ]
    }))?)
}

#[test]
fn scoped_zone_list_keeps_only_granted_zone() -> TestResult {
    let identity = scoped(vec![(1, vec![Action::ListRecords], vec!["TXT"])]);

    let filtered = filter_zone_list(&identity, zone_list()?);

    assert_eq!(filtered.items.len(), 1, "only zone 1 should remain");
    assert_eq!(filtered.items.first().map(|zone| zone.id), Some(1));
    assert_eq!(filtered.total_items, 1, "total should reflect the filtered list");
    assert!(!filtered.has_more_items, "filtered lists never page");

    Ok(())
}

#[test]
fn all_zones_sentinel_returns_list_unmodified() -> TestResult {
    let identity = scoped(vec![(0, vec![Action::ListRecords], vec!["TXT"])]);

    let filtered = filter_zone_list(&identity, zone_list()?);

    assert_eq!(filtered, zone_list()?, "all-zones identity should see the raw page");

    Ok(())
}

#[test]
fn admin_filters_are_no_ops() -> TestResult {
    assert_eq!(filter_zone_list(&Identity::Admin, zone_list()?), zone_list()?);
    assert_eq!(filter_zone(&Identity::Admin, zone_with_records()?), zone_with_records()?);

    Ok(())
}

#[test]
fn identity_without_rows_sees_nothing() -> TestResult {
    let identity = scoped(Vec::new());

    let zones = filter_zone_list(&identity, zone_list()?);
    let records = filter_records(&identity, 1, zone_with_records()?.records);

    assert!(zones.items.is_empty(), "no rows should mean no zones");
    assert_eq!(zones.total_items, 0);
    assert!(records.is_empty(), "no rows should mean no records");

    Ok(())
}

#[test]
fn empty_record_types_keep_every_record() -> TestResult {
    let identity = scoped(vec![(1, vec![Action::ListRecords], Vec::new())]);

    let filtered = filter_zone(&identity, zone_with_records()?);

    assert_eq!(filtered, zone_with_records()?, "empty type set should permit all types");

    Ok(())
}

#[test]
fn restricted_record_types_drop_other_records() -> TestResult {
    let identity = scoped(vec![(1, vec![Action::ListRecords], vec!["TXT"])]);

    let filtered = filter_records(&identity, 1, zone_with_records()?.records);

    assert_eq!(
        serde_json::to_value(&filtered)?,
        json!([{ "Id": 11, "Type": 3, "Name": "_acme-challenge", "Value": "token" }]),
        "only the TXT record should remain"
    );

    Ok(())
}

#[test]
fn unknown_record_types_are_hidden_from_restricted_grants() {
    let identity = scoped(vec![(1, vec![Action::ListRecords], vec!["A"])]);
    let record = Record {
        id: 99,
        record_type: RecordType::from_code(42),
        name: String::new(),
        value: String::new(),
        extra: Map::new(),
    };

    let filtered = filter_records(&identity, 1, vec![record]);

    assert!(filtered.is_empty(), "an unknown type has no name to match");
}
