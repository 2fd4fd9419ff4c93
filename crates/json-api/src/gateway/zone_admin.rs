//! Admin-only Zone Handlers
//!
//! Zone lifecycle, import/export, DNSSEC and certificates are reserved for admins. The gate runs
//! before the body is read and before any upstream call.

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::Value;
use tracing::info;
use zonegate_core::prelude::*;

use crate::{errors::ApiError, extensions::*, state::State};

/// Create Zone Handler
#[handler]
pub(crate) async fn create(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Zone>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    check_permission(identity, &AccessRequest::new(Action::CreateZone, ALL_ZONES))?;

    let body: Value = req.json_body().await?;
    let zone = state.app.provider.create_zone(body).await?;

    info!(zone_id = zone.id, domain = %zone.domain, "created zone");

    res.status_code(StatusCode::CREATED);

    Ok(Json(zone))
}

/// Check Availability Handler
#[handler]
pub(crate) async fn check_availability(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Value>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    require_admin(depot.identity_or_401()?)?;

    let body: Value = req.json_body().await?;

    Ok(Json(state.app.provider.check_availability(body).await?))
}

/// Update Zone Handler
#[handler]
pub(crate) async fn update(req: &mut Request, depot: &mut Depot) -> Result<Json<Zone>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let zone_id = req.path_id("zone")?;

    check_permission(identity, &AccessRequest::new(Action::UpdateZone, zone_id))?;

    let body: Value = req.json_body().await?;
    let zone = state.app.provider.update_zone(zone_id, body).await?;

    info!(zone_id, "updated zone");

    Ok(Json(zone))
}

/// Delete Zone Handler
#[handler]
pub(crate) async fn delete(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let zone_id = req.path_id("zone")?;

    require_admin(depot.identity_or_401()?)?;

    state.app.provider.delete_zone(zone_id).await?;

    info!(zone_id, "deleted zone");

    Ok(StatusCode::NO_CONTENT)
}

/// Import Records Handler
///
/// Forwards the raw zone file with its content type.
#[handler]
pub(crate) async fn import(req: &mut Request, depot: &mut Depot) -> Result<Json<Value>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let zone_id = req.path_id("zone")?;

    require_admin(depot.identity_or_401()?)?;

    let content_type = req.content_type_header();
    let body = req
        .payload()
        .await
        .map_err(|error| {
            tracing::debug!(error = %error, "could not read import body");

            ApiError::invalid_body()
        })?
        .to_vec();

    let summary = state
        .app
        .provider
        .import_records(zone_id, body, content_type)
        .await?;

    info!(zone_id, "imported records");

    Ok(Json(summary))
}

/// Export Records Handler
#[handler]
pub(crate) async fn export(req: &mut Request, depot: &mut Depot) -> Result<Text<String>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let zone_id = req.path_id("zone")?;

    require_admin(depot.identity_or_401()?)?;

    Ok(Text::Plain(state.app.provider.export_records(zone_id).await?))
}

/// Enable DNSSEC Handler
#[handler]
pub(crate) async fn enable_dnssec(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Value>, ApiError> {
    set_dnssec(depot, req.path_id("zone")?, true).await
}

/// Disable DNSSEC Handler
#[handler]
pub(crate) async fn disable_dnssec(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Value>, ApiError> {
    set_dnssec(depot, req.path_id("zone")?, false).await
}

async fn set_dnssec(
    depot: &Depot,
    zone_id: ZoneId,
    enabled: bool,
) -> Result<Json<Value>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    require_admin(depot.identity_or_401()?)?;

    let dnssec = state.app.provider.set_dnssec(zone_id, enabled).await?;

    info!(zone_id, enabled, "changed dnssec");

    Ok(Json(dnssec))
}

/// Issue Certificate Handler
#[handler]
pub(crate) async fn issue_certificate(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let zone_id = req.path_id("zone")?;

    require_admin(depot.identity_or_401()?)?;

    let body: Value = req.json_body().await?;

    state.app.provider.issue_certificate(zone_id, body).await?;

    info!(zone_id, "requested certificate");

    Ok(StatusCode::OK)
}
