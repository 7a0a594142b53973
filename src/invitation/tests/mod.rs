//! Unit tests for the invitation module.
//!
//! Tests are organised by layer: pure domain behaviour, then the response
//! engine over the in-memory adapter.

mod domain_tests;
