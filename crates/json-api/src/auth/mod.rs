//! Authentication

use salvo::{Request, http::header::AUTHORIZATION};

pub(crate) mod admin;
pub(crate) mod middleware;

/// Header carrying the caller's secret, as the bunny.net API expects it.
pub(crate) const ACCESS_KEY_HEADER: &str = "AccessKey";

/// The secret presented by the caller: the `AccessKey` header, or else a bearer token.
pub(crate) fn presented_secret(req: &Request) -> Option<&str> {
    access_key(req).or_else(|| bearer_token(req))
}

fn access_key(req: &Request) -> Option<&str> {
    let value = req.headers().get(ACCESS_KEY_HEADER)?.to_str().ok()?.trim();

    (!value.is_empty()).then_some(value)
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
