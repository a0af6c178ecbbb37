//! Projects, project-scoped membership, invitations, and activity feeds.
//!
//! A project's `members` map is the single source of truth for who belongs
//! to it and with which role. Invitations are short-lived: they are removed
//! as soon as the invitee responds. The activity feed is append-only and is
//! also the [`ports::ActivityLog`] capability other contexts write into.
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
