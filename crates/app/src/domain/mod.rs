//! Zonegate Domain Concerns

pub mod credentials;
pub mod tokens;
