//! Pinchpoint Common Utilities
//!
//! Shared infrastructure for all Pinchpoint crates:
//! - Error types and result aliases
//! - Session clock and frame-rate measurement
//! - Tracing/logging initialization
//! - Configuration loading and validation

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
