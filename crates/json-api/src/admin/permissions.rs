//! Permission Handlers

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;
use zonegate_app::domain::tokens::data::NewPermission;
use zonegate_core::ids::{PermissionId, TokenId};

use crate::{
    admin::models::{CreatePermissionRequest, PermissionResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Add Permission Handler
///
/// Zone `0` grants every zone; an empty record type list grants every type.
#[handler]
pub(crate) async fn create(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PermissionResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let token = TokenId::new(req.path_id("token")?);
    let request: CreatePermissionRequest = req.json_body().await?;

    let permission = state
        .app
        .tokens
        .add_permission(
            token,
            NewPermission {
                zone_id: request.zone_id,
                allowed_actions: request.allowed_actions,
                record_types: request.record_types,
            },
        )
        .await?;

    info!(
        token_id = %token,
        permission_id = %permission.id,
        zone_id = permission.zone_id,
        "added permission"
    );

    res.status_code(StatusCode::CREATED);

    Ok(Json(permission.into()))
}

/// Delete Permission Handler
#[handler]
pub(crate) async fn delete(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let token = TokenId::new(req.path_id("token")?);
    let permission = PermissionId::new(req.path_id("permission")?);

    state.app.tokens.delete_permission(token, permission).await?;

    info!(token_id = %token, permission_id = %permission, "deleted permission");

    Ok(StatusCode::NO_CONTENT)
}
