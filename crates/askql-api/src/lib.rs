#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultAskClient is meant to be
// used through the core ports, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod wire;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultAskClient;

// Configuration
pub use config::ApiClientConfig;

// Errors
pub use error::{ApiError, ApiResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
