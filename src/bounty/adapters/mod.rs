//! Adapter implementations for bounty persistence ports.

pub mod memory;
pub mod postgres;
