//! Zonegate Core
//!
//! Identity, permission and response-filtering rules for the zonegate DNS proxy. Everything in
//! this crate is pure: it never touches storage or the network, so the rules can be exercised in
//! isolation and reused by every transport.

pub mod access;
pub mod actions;
pub mod dns;
pub mod filter;
pub mod identity;
pub mod ids;
pub mod permissions;
pub mod prelude;
