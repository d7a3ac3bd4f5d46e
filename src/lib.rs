//! # Navlink
//!
//! Resilient indoor-navigation metadata retrieval with deterministic
//! offline fallback.
//!
//! ## Overview
//!
//! After a QR-code scan, a mobile client needs a bundle of navigation
//! metadata: which building and zone the code belongs to, which map
//! image to draw, and the precomputed path geometry (step count,
//! distance, clamp bounds, calibration factors) that on-device motion
//! sensors consume to track progress. Navlink provides:
//!
//! - A retrieval client that asks the live backend first, under a hard
//!   deadline with a bounded retry budget
//! - A fallback synthesizer that builds a complete, valid response
//!   locally when the backend is unreachable or returns invalid data
//! - A status prober for advisory connectivity UI
//! - The backend gateway itself, serving the static catalog over HTTP
//!
//! The central guarantee: [`ScanClient::scan`](client::ScanClient::scan)
//! never fails. The caller always receives a structurally valid
//! [`NavigationResponse`](core::NavigationResponse); whether it came
//! from the live backend or local synthesis is visible only in
//! `metadata.source`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use navlink::client::{ClientConfig, ScanClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ClientConfig::new().with_base_url("http://10.0.0.5:5000/api");
//!     let client = ScanClient::new(config).expect("client config");
//!
//!     // Never fails: live data or synthesized fallback.
//!     let response = client.scan("aud_entrance").await;
//!     println!("map: {}", response.navigation.map_image);
//!     println!("source: {}", response.metadata.source);
//! }
//! ```
//!
//! ## Architecture
//!
//! - **core**: wire data model, path geometry, the static catalog, and
//!   structured errors
//! - **gateway**: the transport seam (live HTTP and a mock double)
//! - **client**: retrieval orchestration, configuration, liveness probe
//! - **fallback**: deterministic offline synthesis
//! - **server**: the axum gateway serving the catalog

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod core;
pub mod fallback;
pub mod gateway;
pub mod server;

// Re-export commonly used types at the crate root
pub use crate::client::{BackendStatus, ClientConfig, ScanClient, StatusProber};
pub use crate::core::{
    Catalog, NavigationResponse, PathGeometry, ResponseSource, RetrievalError, ScanRequest,
};
pub use crate::fallback::FallbackSynthesizer;
pub use crate::gateway::{GatewayApi, HttpGateway, MockGateway};

/// Prelude module for convenient imports.
///
/// ```rust
/// use navlink::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{BackendStatus, ClientConfig, ScanClient, StatusProber};
    pub use crate::core::{
        Catalog, Destination, Navigation, NavigationResponse, PathGeometry, ResponseMetadata,
        ResponseSource, RetrievalError, RetrievalResult, ScanRequest, ScannedLocation,
    };
    pub use crate::fallback::FallbackSynthesizer;
    pub use crate::gateway::{ArcGateway, GatewayApi, HttpGateway, MockGateway};
}
