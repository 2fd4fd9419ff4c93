//! Auth middleware.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{debug, warn};
use zonegate_app::crypto::mask_secret;
use zonegate_core::identity::Identity;

use crate::{auth::presented_secret, errors::ApiError, extensions::*, state::State};

/// Resolve the caller's secret to an [`Identity`] and store it in the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state.clone(),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let Some(secret) = presented_secret(req) else {
        res.render(ApiError::new(StatusCode::UNAUTHORIZED, "missing API key"));
        ctrl.skip_rest();

        return;
    };

    let identity = match state.app.auth.authenticate(secret).await {
        Ok(identity) => identity,
        Err(error) => {
            warn!(access_key = %mask_secret(secret), error = %error, "authentication failed");

            res.render(ApiError::from(error));
            ctrl.skip_rest();

            return;
        }
    };

    match &identity {
        Identity::Admin => debug!("authenticated as admin"),
        Identity::Scoped(scoped) => debug!(
            token_id = %scoped.token_id,
            token_name = %scoped.name,
            permissions = scoped.permissions.len(),
            "authenticated scoped token"
        ),
    }

    depot.insert_identity(identity);

    ctrl.call_next(req, depot, res).await;
}
