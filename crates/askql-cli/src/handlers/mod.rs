//! Command handlers.
//!
//! Each handler receives the composed [`crate::bootstrap::CliContext`]
//! and delegates the actual work to the session layer.

pub mod agent;
pub mod ask;
