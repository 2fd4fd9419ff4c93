//! Bootstrap state.

use serde::Serialize;

/// Whether the proxy has been handed over to an admin token yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BootstrapState {
    /// No admin token exists; the master credential itself is accepted as admin.
    Unconfigured,

    /// At least one admin token exists; the master credential is no longer accepted.
    Configured,
}

impl BootstrapState {
    #[must_use]
    pub const fn from_admin_exists(admin_exists: bool) -> Self {
        if admin_exists {
            Self::Configured
        } else {
            Self::Unconfigured
        }
    }

    #[must_use]
    pub const fn accepts_master_credential(self) -> bool {
        matches!(self, Self::Unconfigured)
    }
}
