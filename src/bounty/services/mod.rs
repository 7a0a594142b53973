//! Application services for the bounty engagement lifecycle.

mod board;
mod decision;
mod settlement;

pub use board::{BountyBoardService, PostBountyRequest, SubmitApplicationRequest};
pub use decision::{ApplicationDecisionService, DecideApplicationRequest};
pub use settlement::SettlementService;

use crate::bounty::{domain::BountyDomainError, ports::BountyRepositoryError};
use thiserror::Error;

/// Service-level errors for bounty lifecycle operations.
#[derive(Debug, Error)]
pub enum BountyLifecycleError {
    /// Domain validation or a transition guard failed.
    #[error(transparent)]
    Domain(#[from] BountyDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BountyRepositoryError),
}

/// Result type for bounty lifecycle service operations.
pub type BountyLifecycleResult<T> = Result<T, BountyLifecycleError>;
