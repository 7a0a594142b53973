//! Onepenny: bounty-board engagement lifecycle core.
//!
//! This crate implements the stateful core of a bounty board: users post
//! paid tasks, workers apply, the poster decides applications, and a
//! two-step settlement handshake finalises a completed bounty. The
//! structurally similar invitation-response workflow for team coordination
//! lives alongside it.
//!
//! # Architecture
//!
//! Onepenny follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (in-memory, Postgres)
//!
//! # Modules
//!
//! - [`identity`]: Actor identifier shared across contexts
//! - [`bounty`]: Bounty and application lifecycle, decision and settlement
//! - [`invitation`]: Team invitation response workflow

pub mod bounty;
pub mod identity;
pub mod invitation;
