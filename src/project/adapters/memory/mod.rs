//! In-memory project adapters.

mod invitation;
mod project;

pub use invitation::InMemoryInvitationRepository;
pub use project::InMemoryProjectRepository;
