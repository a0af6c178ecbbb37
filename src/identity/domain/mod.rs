//! Domain model for users and sessions.
//!
//! Passwords are kept as plain strings and compared verbatim; hardening
//! authentication is outside the scope of this crate.

mod email;
mod error;
mod ids;
mod session;
mod user;

pub use email::EmailAddress;
pub use error::{IdentityDomainError, ParseGlobalRoleError};
pub use ids::UserId;
pub use session::{Session, SessionState};
pub use user::{Actor, GlobalRole, User, UserProfile, UserUpdate};
