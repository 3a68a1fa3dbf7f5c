//! State module for tracking traversal progress
//!
//! `VisitState` tracks a single page visit from the moment it is queued
//! until it finishes or aborts.

mod visit_state;

pub use visit_state::VisitState;
