//! Task lifecycle engine.
//!
//! Tasks move through `pending`, `todo`, `inprogress`, `done` and `rejected`.
//! An admin assigning work to someone else starts the task in `pending`;
//! the assignee either accepts it onto the board or rejects it, after which
//! the admin acknowledges the rejection. Every mutation logs project activity
//! through [`crate::project::ports::ActivityLog`] and assignment notices go
//! out through [`crate::notification::ports::NotificationSink`].
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
