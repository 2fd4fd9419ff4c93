//! Zone Handlers

use std::sync::Arc;

use salvo::prelude::*;
use zonegate_core::prelude::*;

use crate::{errors::ApiError, extensions::*, state::State};

/// List Zones Handler
///
/// Scoped identities only see the zones they hold a permission row for.
#[handler]
pub(crate) async fn list(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ListZonesResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    check_permission(identity, &AccessRequest::new(Action::ListZones, ALL_ZONES))?;

    let options = ListZonesOptions {
        page: req.optional_query("page")?,
        per_page: req.optional_query("perPage")?,
        search: req.query::<String>("search"),
    };

    let zones = state.app.provider.list_zones(&options).await?;

    Ok(Json(filter_zone_list(identity, zones)))
}

/// Get Zone Handler
///
/// Returns the zone with records outside the identity's record types removed.
#[handler]
pub(crate) async fn get(req: &mut Request, depot: &mut Depot) -> Result<Json<Zone>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let zone_id = req.path_id("zone")?;

    check_permission(identity, &AccessRequest::new(Action::GetZone, zone_id))?;

    let zone = state.app.provider.get_zone(zone_id).await?;

    Ok(Json(filter_zone(identity, zone)))
}
