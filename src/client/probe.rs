//! Backend liveness probing.
//!
//! The prober is advisory only: the UI uses it to show connectivity
//! state, but retrieval always attempts the live gateway first, whatever
//! the last probe said.

use crate::client::ClientConfig;
use crate::core::RetrievalResult;
use crate::gateway::{ArcGateway, HttpGateway};

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Message reported when the backend cannot be probed.
const OFFLINE_MESSAGE: &str = "Backend offline - app will use fallback data";

/// Advisory note reported when the backend cannot be probed.
const OFFLINE_NOTE: &str = "Navigation still works fully offline after a QR scan";

/// Result of a liveness probe.
#[derive(Debug, Clone, Serialize)]
pub struct BackendStatus {
    /// Whether the gateway answered the probe.
    pub online: bool,

    /// Advisory message when offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Advisory note when offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// The gateway's health document when online.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<serde_json::Value>,
}

/// Probes the backend gateway's health endpoint.
#[derive(Debug)]
pub struct StatusProber {
    gateway: ArcGateway,
    timeout: Duration,
}

impl StatusProber {
    /// Default probe timeout.
    ///
    /// Deliberately much shorter than the scan deadline: a liveness
    /// probe that takes seconds to answer is as good as offline.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

    /// Creates a prober against the live gateway named in the
    /// configuration.
    pub fn new(config: &ClientConfig) -> RetrievalResult<Self> {
        let gateway = HttpGateway::new(config.base_url.clone(), Self::DEFAULT_TIMEOUT)?;
        Ok(Self::with_gateway(Arc::new(gateway), Self::DEFAULT_TIMEOUT))
    }

    /// Creates a prober over an arbitrary gateway transport.
    pub fn with_gateway(gateway: ArcGateway, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    /// Runs one best-effort liveness probe.
    ///
    /// Never raises: any failure, timeout included, becomes
    /// `online: false` with a static advisory note.
    pub async fn check(&self) -> BackendStatus {
        match timeout(self.timeout, self.gateway.health()).await {
            Ok(Ok(health)) => BackendStatus {
                online: true,
                message: None,
                note: None,
                health: Some(health),
            },
            Ok(Err(error)) => {
                tracing::debug!(error = %error, "Health probe failed");
                Self::offline()
            }
            Err(_) => {
                tracing::debug!(timeout = ?self.timeout, "Health probe timed out");
                Self::offline()
            }
        }
    }

    fn offline() -> BackendStatus {
        BackendStatus {
            online: false,
            message: Some(OFFLINE_MESSAGE.to_string()),
            note: Some(OFFLINE_NOTE.to_string()),
            health: None,
        }
    }
}
