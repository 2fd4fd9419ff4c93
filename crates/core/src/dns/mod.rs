//! DNS provider data
//!
//! Zone and record shapes as returned by the upstream provider. Only the fields the permission
//! engine reasons about are typed; everything else is carried through untouched.

mod record_type;
mod zone;

pub use record_type::*;
pub use zone::*;
