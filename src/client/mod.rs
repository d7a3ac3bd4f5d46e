//! The retrieval client and its supporting pieces.
//!
//! - [`config`] - Explicit, injectable client configuration
//! - [`retrieval`] - The never-failing [`ScanClient`]
//! - [`probe`] - Advisory backend liveness probing

pub mod config;
pub mod probe;
pub mod retrieval;

// Re-exports
pub use config::ClientConfig;
pub use probe::{BackendStatus, StatusProber};
pub use retrieval::{AttemptOutcome, ScanClient};
