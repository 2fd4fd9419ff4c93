//! Shared application domain, persistence and upstream modules.

pub mod auth;
pub mod context;
pub mod crypto;
pub mod database;
pub mod domain;
pub mod provider;

#[cfg(test)]
mod test;
