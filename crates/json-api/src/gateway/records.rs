//! Record Handlers

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;
use zonegate_core::prelude::*;

use crate::{errors::ApiError, extensions::*, state::State};

/// List Records Handler
#[handler]
pub(crate) async fn list(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<Record>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let zone_id = req.path_id("zone")?;

    check_permission(identity, &AccessRequest::new(Action::ListRecords, zone_id))?;

    let zone = state.app.provider.get_zone(zone_id).await?;

    Ok(Json(filter_records(identity, zone_id, zone.records)))
}

/// Add Record Handler
#[handler]
pub(crate) async fn add(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Record>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let zone_id = req.path_id("zone")?;
    let body: RecordRequest = req.json_body().await?;

    check_permission(
        identity,
        &AccessRequest::new(Action::AddRecord, zone_id).with_record_type(body.record_type),
    )?;

    let record = state.app.provider.add_record(zone_id, body).await?;

    info!(zone_id, record_id = record.id, record_type = %record.record_type, "added record");

    res.status_code(StatusCode::CREATED);

    Ok(Json(record))
}

/// Update Record Handler
///
/// Answers 200 with the record when the provider returns it, 204 otherwise.
#[handler]
pub(crate) async fn update(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let zone_id = req.path_id("zone")?;
    let record_id = req.path_id("record")?;
    let body: RecordRequest = req.json_body().await?;

    check_permission(
        identity,
        &AccessRequest::new(Action::UpdateRecord, zone_id).with_record_type(body.record_type),
    )?;

    ensure_existing_record_permitted(state, identity, zone_id, record_id, Action::UpdateRecord)
        .await?;

    let updated = state
        .app
        .provider
        .update_record(zone_id, record_id, body)
        .await?;

    info!(zone_id, record_id, "updated record");

    match updated {
        Some(record) => {
            res.render(Json(record));

            Ok(StatusCode::OK)
        }
        None => Ok(StatusCode::NO_CONTENT),
    }
}

/// Delete Record Handler
#[handler]
pub(crate) async fn delete(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let zone_id = req.path_id("zone")?;
    let record_id = req.path_id("record")?;

    check_permission(identity, &AccessRequest::new(Action::DeleteRecord, zone_id))?;

    ensure_existing_record_permitted(state, identity, zone_id, record_id, Action::DeleteRecord)
        .await?;

    state.app.provider.delete_record(zone_id, record_id).await?;

    info!(zone_id, record_id, "deleted record");

    Ok(StatusCode::NO_CONTENT)
}

/// With a restricted type grant, the record being changed must itself be of a granted type.
async fn ensure_existing_record_permitted(
    state: &State,
    identity: &Identity,
    zone_id: ZoneId,
    record_id: RecordId,
    action: Action,
) -> Result<(), ApiError> {
    if !requires_existing_record_check(identity, zone_id, action) {
        return Ok(());
    }

    let zone = state.app.provider.get_zone(zone_id).await?;

    let existing = zone
        .record(record_id)
        .ok_or_else(|| ApiError::not_found("resource not found"))?;

    check_permission(
        identity,
        &AccessRequest::new(action, zone_id).with_record_type(existing.record_type),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use zonegate_app::provider::MockDnsProvider;

    use crate::{
        errors::ErrorBody,
        gateway,
        test_helpers::{Mocks, make_record, make_zone, scoped, service_as, strict_provider_mock},
    };

    use super::*;

    fn send_as(identity: Identity, provider: MockDnsProvider) -> Service {
        service_as(identity, Mocks::with_provider(provider), gateway::router())
    }

    fn zone_with_records() -> Zone {
        make_zone(
            1,
            "one.example",
            vec![
                make_record(10, RecordType::A, "www"),
                make_record(11, RecordType::Txt, "_acme-challenge"),
                make_record(12, RecordType::Unknown(99), "odd"),
            ],
        )
    }

    fn txt_writer() -> Identity {
        scoped(&[(
            1,
            &[
                Action::ListRecords,
                Action::AddRecord,
                Action::UpdateRecord,
                Action::DeleteRecord,
            ],
            &["TXT"],
        )])
    }

    #[tokio::test]
    async fn list_records_filters_by_type_and_drops_unknown_codes() -> TestResult {
        let mut provider = MockDnsProvider::new();

        provider
            .expect_get_zone()
            .once()
            .withf(|zone| *zone == 1)
            .return_once(|_| Ok(zone_with_records()));

        let records: Vec<Record> = TestClient::get("http://example.com/dnszone/1/records")
            .send(&send_as(txt_writer(), provider))
            .await
            .take_json()
            .await?;

        let ids: Vec<RecordId> = records.iter().map(|record| record.id).collect();

        assert_eq!(ids, vec![11], "only the TXT record remains");

        Ok(())
    }

    #[tokio::test]
    async fn list_records_requires_the_action() -> TestResult {
        let identity = scoped(&[(1, &[Action::GetZone], &[])]);

        let mut res = TestClient::get("http://example.com/dnszone/1/records")
            .send(&send_as(identity, strict_provider_mock()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN), "status");
        assert_eq!(body.error, "permission denied", "error message");

        Ok(())
    }

    #[tokio::test]
    async fn add_permitted_type_returns_201() -> TestResult {
        let mut provider = MockDnsProvider::new();

        provider
            .expect_add_record()
            .once()
            .withf(|zone, request| *zone == 1 && request.record_type == RecordType::Txt)
            .return_once(|_, _| Ok(make_record(20, RecordType::Txt, "_acme-challenge")));

        let mut res = TestClient::put("http://example.com/dnszone/1/records")
            .json(&json!({ "Type": 3, "Name": "_acme-challenge", "Value": "token" }))
            .send(&send_as(txt_writer(), provider))
            .await;

        let record: Record = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED), "status");
        assert_eq!(record.id, 20, "created record returned");

        Ok(())
    }

    #[tokio::test]
    async fn add_accepts_post_and_type_names() {
        let mut provider = MockDnsProvider::new();

        provider
            .expect_add_record()
            .once()
            .withf(|_, request| request.record_type == RecordType::Txt)
            .return_once(|_, _| Ok(make_record(20, RecordType::Txt, "x")));

        let res = TestClient::post("http://example.com/dnszone/1/records")
            .json(&json!({ "Type": "txt", "Name": "x", "Value": "y" }))
            .send(&send_as(txt_writer(), provider))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED), "status");
    }

    #[tokio::test]
    async fn add_unpermitted_type_is_denied_before_upstream() -> TestResult {
        let mut res = TestClient::put("http://example.com/dnszone/1/records")
            .json(&json!({ "Type": 0, "Name": "www", "Value": "192.0.2.1" }))
            .send(&send_as(txt_writer(), strict_provider_mock()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN), "status");
        assert_eq!(body.error, "permission denied", "error message");

        Ok(())
    }

    #[tokio::test]
    async fn add_to_unpermitted_zone_is_denied() {
        let res = TestClient::put("http://example.com/dnszone/2/records")
            .json(&json!({ "Type": 3, "Name": "x", "Value": "y" }))
            .send(&send_as(txt_writer(), strict_provider_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN), "status");
    }

    #[tokio::test]
    async fn add_with_invalid_body_returns_400() -> TestResult {
        let mut res = TestClient::put("http://example.com/dnszone/1/records")
            .json(&json!({ "Name": "no type" }))
            .send(&send_as(txt_writer(), strict_provider_mock()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "status");
        assert_eq!(body.error, "invalid request body", "error message");

        Ok(())
    }

    #[tokio::test]
    async fn update_checks_existing_record_type() -> TestResult {
        let mut provider = MockDnsProvider::new();

        provider
            .expect_get_zone()
            .once()
            .return_once(|_| Ok(zone_with_records()));
        provider.expect_update_record().never();

        let res = TestClient::post("http://example.com/dnszone/1/records/10")
            .json(&json!({ "Type": 3, "Name": "www", "Value": "retyped" }))
            .send(&send_as(txt_writer(), provider))
            .await;

        assert_eq!(
            res.status_code,
            Some(StatusCode::FORBIDDEN),
            "an A record cannot be retyped by a TXT-only token"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_permitted_record_without_body_returns_204() {
        let mut provider = MockDnsProvider::new();

        provider
            .expect_get_zone()
            .once()
            .return_once(|_| Ok(zone_with_records()));
        provider
            .expect_update_record()
            .once()
            .withf(|zone, record, request| {
                *zone == 1 && *record == 11 && request.record_type == RecordType::Txt
            })
            .return_once(|_, _, _| Ok(None));

        let res = TestClient::post("http://example.com/dnszone/1/records/11")
            .json(&json!({ "Type": 3, "Name": "_acme-challenge", "Value": "new" }))
            .send(&send_as(txt_writer(), provider))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT), "status");
    }

    #[tokio::test]
    async fn update_with_record_body_returns_200() -> TestResult {
        let mut provider = MockDnsProvider::new();

        provider
            .expect_update_record()
            .once()
            .return_once(|_, _, _| Ok(Some(make_record(10, RecordType::A, "www"))));

        let mut res = TestClient::post("http://example.com/dnszone/1/records/10")
            .json(&json!({ "Type": 0, "Name": "www", "Value": "192.0.2.2" }))
            .send(&send_as(Identity::Admin, provider))
            .await;

        let record: Record = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK), "status");
        assert_eq!(record.id, 10, "updated record returned");

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_record_returns_404() {
        let mut provider = MockDnsProvider::new();

        provider
            .expect_get_zone()
            .once()
            .return_once(|_| Ok(zone_with_records()));
        provider.expect_update_record().never();

        let res = TestClient::post("http://example.com/dnszone/1/records/404")
            .json(&json!({ "Type": 3, "Name": "x", "Value": "y" }))
            .send(&send_as(txt_writer(), provider))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "status");
    }

    #[tokio::test]
    async fn delete_of_other_type_is_denied() {
        let mut provider = MockDnsProvider::new();

        provider
            .expect_get_zone()
            .once()
            .return_once(|_| Ok(zone_with_records()));
        provider.expect_delete_record().never();

        let res = TestClient::delete("http://example.com/dnszone/1/records/10")
            .send(&send_as(txt_writer(), provider))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN), "status");
    }

    #[tokio::test]
    async fn delete_with_unrestricted_grant_skips_lookup() {
        let identity = scoped(&[(1, &[Action::DeleteRecord], &[])]);

        let mut provider = MockDnsProvider::new();

        provider.expect_get_zone().never();
        provider
            .expect_delete_record()
            .once()
            .withf(|zone, record| *zone == 1 && *record == 10)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete("http://example.com/dnszone/1/records/10")
            .send(&send_as(identity, provider))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT), "status");
    }

    #[tokio::test]
    async fn inert_row_grants_nothing() {
        let identity = scoped(&[(1, &[], &[])]);

        let res = TestClient::delete("http://example.com/dnszone/1/records/10")
            .send(&send_as(identity, strict_provider_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN), "status");
    }
}
