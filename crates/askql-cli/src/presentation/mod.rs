//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Domain transforms belong in core services or CLI-local view-model helpers

pub mod answer;

// Re-export commonly used items
pub use answer::{print_answer, print_failure, print_separator, print_sources, print_thoughts};
