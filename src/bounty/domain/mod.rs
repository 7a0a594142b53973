//! Domain model for the bounty engagement lifecycle.
//!
//! The bounty domain models posting, application decisions, and the
//! settlement handshake while keeping all infrastructure concerns outside
//! of the domain boundary. Status transitions are guarded here; persistence
//! adapters re-check the prior status when committing so that concurrent
//! callers cannot both win a transition.

mod application;
mod bounty;
mod error;
mod ids;
mod reward;

pub use application::{Application, ApplicationStatus, PersistedApplicationData};
pub use bounty::{Bounty, BountyStatus, PersistedBountyData};
pub use error::{BountyDomainError, ParseApplicationStatusError, ParseBountyStatusError};
pub use ids::{ApplicationId, BountyId};
pub use reward::Reward;

pub use crate::identity::UserId;
