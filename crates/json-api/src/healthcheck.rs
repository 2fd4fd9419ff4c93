//! Zonegate Healthcheck Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Healthcheck handler
///
/// Reports `ok` once the token store answers a trivial query.
#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let status = match state.app.db.ping().await {
        Ok(()) => "ok",
        Err(source) => {
            error!("healthcheck failed: {source}");

            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            "unavailable"
        }
    };

    res.render(Json(HealthResponse {
        status: status.to_owned(),
    }));
}
