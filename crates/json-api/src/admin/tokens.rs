//! Token Handlers

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;
use zonegate_app::{
    auth::BootstrapState,
    crypto::Secret,
    domain::tokens::data::{NewPermission, NewToken},
};
use zonegate_core::ids::TokenId;

use crate::{
    admin::models::{
        CreateTokenRequest, CreatedTokenResponse, TokenDetailsResponse, TokenResponse,
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

/// List Tokens Handler
///
/// Newest first.
#[handler]
pub(crate) async fn list(depot: &mut Depot) -> Result<Json<Vec<TokenResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tokens = state.app.tokens.list_tokens().await?;

    Ok(Json(tokens.into_iter().map(Into::into).collect()))
}

/// Create Token Handler
///
/// Generates the secret server-side and returns it exactly once. Until an admin token exists
/// only admin tokens may be created.
#[handler]
pub(crate) async fn create(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CreatedTokenResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request: CreateTokenRequest = req.json_body().await?;

    if request.is_admin {
        if !request.zones.is_empty()
            || !request.actions.is_empty()
            || !request.record_types.is_empty()
        {
            return Err(ApiError::bad_request("admin tokens cannot hold permissions"));
        }
    } else {
        if state.app.auth.bootstrap_state().await? == BootstrapState::Unconfigured {
            return Err(ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "no_admin_token_exists",
            ));
        }

        if request.zones.is_empty() || request.actions.is_empty() {
            return Err(ApiError::bad_request(
                "scoped tokens need at least one zone and one action",
            ));
        }
    }

    let permissions = request
        .zones
        .iter()
        .map(|zone_id| NewPermission {
            zone_id: *zone_id,
            allowed_actions: request.actions.clone(),
            record_types: request.record_types.clone(),
        })
        .collect();

    let secret = Secret::generate();

    let token = state
        .app
        .tokens
        .create_token(NewToken {
            name: request.name,
            is_admin: request.is_admin,
            secret: secret.clone(),
            permissions,
        })
        .await?;

    info!(token_id = %token.id, is_admin = token.is_admin, "created token");

    res.status_code(StatusCode::CREATED);

    Ok(Json(CreatedTokenResponse {
        token: token.into(),
        token_secret: secret.expose().to_owned(),
    }))
}

/// Get Token Handler
#[handler]
pub(crate) async fn get(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<TokenDetailsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let token = TokenId::new(req.path_id("token")?);

    let details = state.app.tokens.get_token(token).await?;

    Ok(Json(details.into()))
}

/// Delete Token Handler
///
/// Permission rows go with the token.
#[handler]
pub(crate) async fn delete(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let token = TokenId::new(req.path_id("token")?);

    state.app.tokens.delete_token(token).await?;

    info!(token_id = %token, "deleted token");

    Ok(StatusCode::NO_CONTENT)
}
