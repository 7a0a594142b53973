//! Bounty engagement lifecycle for Onepenny.
//!
//! This module covers the genuinely stateful part of the bounty board: the
//! sequence of status transitions a bounty and its applications go through
//! from posting to settlement. Approving an application assigns the bounty
//! to the applicant in the same atomic commit; the two-step settlement
//! handshake then requires the receiver to request settlement and the
//! poster to confirm it, so neither party can unilaterally finalise a
//! reward. The module follows hexagonal architecture:
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
