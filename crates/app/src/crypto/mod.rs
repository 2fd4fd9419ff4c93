//! Secrets at rest
//!
//! Token secrets are hashed one way with SHA-256 ([`HashedSecret`]). The master credential must be
//! recovered for every upstream call, so it is encrypted with AES-256-GCM ([`EncryptedSecret`]).

mod encrypted;
mod errors;
mod hashed;
mod secret;

pub use encrypted::*;
pub use errors::*;
pub use hashed::*;
pub use secret::*;
