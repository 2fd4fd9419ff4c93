//! Master Key Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{admin::models::MasterKeyRequest, errors::ApiError, extensions::*, state::State};

/// Replace Master Key Handler
///
/// Takes effect on the next upstream call; no restart needed.
#[handler]
pub(crate) async fn update(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request: MasterKeyRequest = req.json_body().await?;

    state
        .app
        .credentials
        .set_master_credential(&request.api_key)
        .await?;

    info!("replaced master credential");

    Ok(StatusCode::NO_CONTENT)
}
