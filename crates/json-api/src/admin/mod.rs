//! Admin API
//!
//! Token, permission and master credential management behind the admin gate, plus `whoami` for
//! any authenticated caller.

use salvo::Router;

use crate::auth;

pub(crate) mod master_key;
pub(crate) mod models;
pub(crate) mod permissions;
pub(crate) mod tokens;
pub(crate) mod whoami;

pub(crate) fn router() -> Router {
    Router::with_path("admin/api")
        .push(Router::with_path("whoami").get(whoami::get))
        .push(
            Router::new()
                .hoop(auth::admin::handler)
                .push(
                    Router::with_path("tokens")
                        .get(tokens::list)
                        .post(tokens::create)
                        .push(
                            Router::with_path("{token}")
                                .get(tokens::get)
                                .delete(tokens::delete)
                                .push(
                                    Router::with_path("permissions")
                                        .post(permissions::create)
                                        .push(
                                            Router::with_path("{permission}")
                                                .delete(permissions::delete),
                                        ),
                                ),
                        ),
                )
                .push(Router::with_path("master-key").put(master_key::update)),
        )
}
