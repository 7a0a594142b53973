//! Unit tests for the bounty module.
//!
//! Tests are organised by layer: pure domain behaviour, the decision
//! engine, and the settlement engine over the in-memory adapter.

mod settlement_service_tests;
