//! Whoami Handler

use std::sync::Arc;

use salvo::prelude::*;
use zonegate_app::auth::BootstrapState;
use zonegate_core::identity::Identity;

use crate::{admin::models::WhoamiResponse, errors::ApiError, extensions::*, state::State};

/// Whoami Handler
///
/// Open to every authenticated caller. While no admin token exists the only admin identity is the
/// master credential, so that is what an admin is reported as during bootstrap.
#[handler]
pub(crate) async fn get(depot: &mut Depot) -> Result<Json<WhoamiResponse>, ApiError> {
    let identity = depot.identity_or_401()?;

    let response = match identity {
        Identity::Admin => {
            let state = depot.obtain_or_500::<Arc<State>>()?;
            let bootstrap = state.app.auth.bootstrap_state().await?;

            WhoamiResponse::admin(bootstrap == BootstrapState::Unconfigured)
        }
        Identity::Scoped(scoped) => WhoamiResponse::scoped(scoped),
    };

    Ok(Json(response))
}
