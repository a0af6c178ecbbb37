//! User accounts and the authenticated session for Novatra.
//!
//! The identity context owns registration, credential checks, profile
//! updates, and the auto-provisioning of accounts for invited email
//! addresses. It is the leaf dependency of every other context:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
