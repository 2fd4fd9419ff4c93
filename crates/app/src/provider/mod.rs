//! DNS Provider

mod bunny;
mod errors;
mod service;

pub use bunny::*;
pub use errors::*;
pub use service::*;
