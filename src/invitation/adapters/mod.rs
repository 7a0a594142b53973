//! Adapter implementations for invitation persistence ports.

pub mod memory;
pub mod postgres;
