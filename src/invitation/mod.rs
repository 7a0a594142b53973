//! Team invitation response workflow for Onepenny.
//!
//! An inviter proposes that another user join a team; the invitee responds
//! exactly once, and only while the invitation is still pending and not
//! past its optional expiry. The inviter may retract a pending invitation
//! at any time, even an expired one, to clean it up. The module follows
//! hexagonal architecture:
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
