//! Master Credential

pub mod errors;
mod repository;
pub mod service;

pub use errors::CredentialsServiceError;
pub use service::*;
