//! Admin gate.

use salvo::prelude::*;
use zonegate_core::access::require_admin;

use crate::{errors::ApiError, extensions::*};

/// Reject any identity that is not an admin. Must run after the auth middleware.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let decision = depot
        .identity_or_401()
        .and_then(|identity| require_admin(identity).map_err(ApiError::from));

    if let Err(error) = decision {
        res.render(error);
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
