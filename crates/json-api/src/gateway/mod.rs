//! DNS Gateway
//!
//! Forwards `/dnszone` requests to the provider. Scoped identities are checked before the
//! upstream call and their responses are filtered on the way back.

use salvo::Router;

pub(crate) mod records;
pub(crate) mod zone_admin;
pub(crate) mod zones;

pub(crate) fn router() -> Router {
    Router::with_path("dnszone")
        .get(zones::list)
        .post(zone_admin::create)
        .push(Router::with_path("checkavailability").post(zone_admin::check_availability))
        .push(
            Router::with_path("{zone}")
                .get(zones::get)
                .post(zone_admin::update)
                .delete(zone_admin::delete)
                .push(
                    Router::with_path("records")
                        .get(records::list)
                        .put(records::add)
                        .post(records::add)
                        .push(
                            Router::with_path("{record}")
                                .post(records::update)
                                .delete(records::delete),
                        ),
                )
                .push(Router::with_path("import").post(zone_admin::import))
                .push(Router::with_path("export").get(zone_admin::export))
                .push(
                    Router::with_path("dnssec")
                        .post(zone_admin::enable_dnssec)
                        .delete(zone_admin::disable_dnssec),
                )
                .push(Router::with_path("certificate/issue").post(zone_admin::issue_certificate)),
        )
}
