//! Authentication

mod bootstrap;
mod errors;
mod service;

pub use bootstrap::*;
pub use errors::*;
pub use service::*;
