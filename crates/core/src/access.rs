//! Access Checks
//!
//! Pure authorization decisions made before any upstream call.

use thiserror::Error;

use crate::{
    actions::Action,
    dns::{RecordType, ZoneId},
    identity::Identity,
};

/// Why an identity was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The operation is reserved for admins.
    #[error("admin_required")]
    AdminRequired,

    /// No permission row grants the operation.
    #[error("permission denied")]
    PermissionDenied,
}

/// An operation an identity wants to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRequest {
    /// Requested action.
    pub action: Action,

    /// Target zone. Ignored for zone listing.
    pub zone_id: ZoneId,

    /// Record type being written or touched, if the operation concerns one.
    pub record_type: Option<RecordType>,
}

impl AccessRequest {
    /// A request without a record type.
    #[must_use]
    pub const fn new(action: Action, zone_id: ZoneId) -> Self {
        Self {
            action,
            zone_id,
            record_type: None,
        }
    }

    /// Attach the record type the operation concerns.
    #[must_use]
    pub const fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }
}

/// Reject anything but an admin.
///
/// # Errors
///
/// Returns [`AccessError::AdminRequired`] for scoped identities.
pub const fn require_admin(identity: &Identity) -> Result<(), AccessError> {
    match identity {
        Identity::Admin => Ok(()),
        Identity::Scoped(_) => Err(AccessError::AdminRequired),
    }
}

/// Decide whether an identity may perform a request.
///
/// Admins may do anything. Scoped identities may always list zones, may read a zone they hold any
/// row for, and otherwise need a row covering the zone that lists the action. When the request
/// carries a record type, or the action writes one, that type must be permitted by the same rows.
///
/// # Errors
///
/// Returns [`AccessError::AdminRequired`] for admin-only actions and
/// [`AccessError::PermissionDenied`] when no row grants the request.
pub fn check_permission(identity: &Identity, request: &AccessRequest) -> Result<(), AccessError> {
    let Some(scoped) = identity.as_scoped() else {
        return Ok(());
    };

    match request.action {
        Action::ListZones => return Ok(()),
        action if action.is_admin_only() => return Err(AccessError::AdminRequired),
        Action::GetZone => {
            return if scoped.covers_zone(request.zone_id) {
                Ok(())
            } else {
                Err(AccessError::PermissionDenied)
            };
        }
        _ => {}
    }

    if scoped.granting(request.zone_id, request.action).next().is_none() {
        return Err(AccessError::PermissionDenied);
    }

    let types = scoped.granted_record_types(request.zone_id, request.action);

    match request.record_type {
        Some(record_type) if !types.permits_type(record_type) => Err(AccessError::PermissionDenied),
        None if request.action.checks_record_type() && types.is_restricted() => {
            Err(AccessError::PermissionDenied)
        }
        _ => Ok(()),
    }
}

/// Whether an update or delete must also prove the existing record's type is permitted.
///
/// True only when the rows granting the action restrict record types.
#[must_use]
pub fn requires_existing_record_check(identity: &Identity, zone_id: ZoneId, action: Action) -> bool {
    if !matches!(action, Action::UpdateRecord | Action::DeleteRecord) {
        return false;
    }

    identity
        .as_scoped()
        .is_some_and(|scoped| scoped.granted_record_types(zone_id, action).is_restricted())
}
