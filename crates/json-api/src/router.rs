//! App Router

use salvo::Router;

use crate::{admin, auth, gateway, healthcheck, observability};

/// Public probes, then everything else behind authentication.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(gateway::router())
                .push(admin::router()),
        )
}
