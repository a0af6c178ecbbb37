//! Application services for identity management.

mod accounts;

pub use accounts::{IdentityError, IdentityResult, IdentityService, RegisterUserRequest};
