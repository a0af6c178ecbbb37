//! Novatra: project and task management for small teams.
//!
//! The crate models accounts, projects with member roles and invitations,
//! per-user notification mailboxes, and tasks that move across a kanban
//! board after an assignment handshake.
//!
//! # Architecture
//!
//! Each context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and cross-context calls
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//!
//! # Modules
//!
//! - [`identity`]: Accounts, login, and the session slot
//! - [`project`]: Projects, membership, invitations, and activity feeds
//! - [`notification`]: Per-user mailboxes
//! - [`task`]: Task creation, assignment handshake, and board moves
//! - [`templates`]: Activity and notification wording
//! - [`workspace`]: The state container, its flows, and snapshot storage

pub mod identity;
pub mod notification;
pub mod project;
pub mod task;
pub mod templates;
pub mod workspace;
