//! Gateway transport implementations.
//!
//! The retrieval client talks to the backend through the [`GatewayApi`]
//! trait, so tests can swap the live HTTP transport for a scripted
//! double.
//!
//! ## Available transports
//!
//! - [`http`] - The live backend over HTTP (reqwest)
//! - [`mock`] - A configurable test double

pub mod http;
pub mod mock;

use crate::core::{NavigationResponse, RetrievalResult, ScanRequest};

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// The transport seam between the retrieval client and the backend.
///
/// Implementations must be `Send + Sync` for use across tasks and must
/// never panic; every failure is returned as a
/// [`RetrievalError`](crate::core::RetrievalError).
#[async_trait]
pub trait GatewayApi: Send + Sync + Debug {
    /// Returns a stable, human-readable name for this transport.
    fn name(&self) -> &str;

    /// Submits a scan request and returns the gateway's navigation
    /// metadata.
    ///
    /// Transport-level deadlines are the caller's concern; the retrieval
    /// client races this call against its own deadline and drops the
    /// future when it fires.
    async fn qr_scan(&self, request: &ScanRequest) -> RetrievalResult<NavigationResponse>;

    /// Fetches the gateway's health document.
    ///
    /// A lightweight liveness probe; must not require a scan payload.
    async fn health(&self) -> RetrievalResult<serde_json::Value>;
}

/// An arc-wrapped gateway for shared ownership.
pub type ArcGateway = Arc<dyn GatewayApi>;

// Re-exports
pub use http::HttpGateway;
pub use mock::MockGateway;
