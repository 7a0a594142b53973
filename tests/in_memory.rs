//! In-memory repository integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `engagement_flow_tests`: Full bounty lifecycle from posting to settlement
//! - `invitation_flow_tests`: Invitation send, response, and retraction

mod in_memory {
    mod engagement_flow_tests;
    mod invitation_flow_tests;
}
