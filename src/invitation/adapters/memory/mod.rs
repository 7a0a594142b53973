//! In-memory adapters for invitation persistence.

mod repository;

pub use repository::InMemoryInvitationRepository;
