//! Per-user notification mailbox.
//!
//! Notifications are addressed to exactly one user. Actionable ones
//! (assignment notices, invitation prompts) carry a payload pointing at the
//! task or invitation they concern; once answered they are resolved into a
//! terminal informational entry with the payload cleared.
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
