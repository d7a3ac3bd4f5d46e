//! Mock gateway for testing.
//!
//! A configurable double for the [`GatewayApi`] seam: outcomes can be
//! scripted per call, a default outcome covers the rest, and an optional
//! latency simulates a slow backend for deadline tests.

use crate::core::{NavigationResponse, RetrievalError, RetrievalResult, ScanRequest};
use crate::gateway::GatewayApi;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A mock gateway for testing purposes.
///
/// # Examples
///
/// ```rust,ignore
/// use navlink::gateway::MockGateway;
///
/// // Always succeed with a fixed response
/// let gateway = MockGateway::serving(response);
///
/// // Fail once with a transient error, then succeed
/// let gateway = MockGateway::serving(response)
///     .with_outcome(Err(RetrievalError::network("connection reset")));
/// ```
#[derive(Debug)]
pub struct MockGateway {
    /// Name of this gateway instance.
    name: String,
    /// Outcomes consumed in order before falling back to the default.
    script: Mutex<VecDeque<RetrievalResult<NavigationResponse>>>,
    /// Outcome for calls beyond the script.
    default_outcome: RetrievalResult<NavigationResponse>,
    /// Simulated latency per call.
    latency: Option<Duration>,
    /// Counter of scan calls made.
    scan_count: AtomicU64,
    /// Whether health probes succeed.
    healthy: AtomicBool,
}

impl MockGateway {
    /// Creates a mock whose every call fails as unreachable.
    pub fn unreachable() -> Self {
        Self {
            name: "mock".to_string(),
            script: Mutex::new(VecDeque::new()),
            default_outcome: Err(RetrievalError::network("connection refused")),
            latency: None,
            scan_count: AtomicU64::new(0),
            healthy: AtomicBool::new(false),
        }
    }

    /// Creates a mock that answers every call with the given response.
    pub fn serving(response: NavigationResponse) -> Self {
        Self {
            default_outcome: Ok(response),
            healthy: AtomicBool::new(true),
            ..Self::unreachable()
        }
    }

    /// Sets the name of this gateway.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Queues an outcome to be consumed before the default applies.
    pub fn with_outcome(self, outcome: RetrievalResult<NavigationResponse>) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    /// Sets the simulated latency for scan and health calls.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Returns the number of scan calls made so far.
    pub fn scan_count(&self) -> u64 {
        self.scan_count.load(Ordering::Relaxed)
    }

    /// Sets whether health probes succeed.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Relaxed);
    }
}

#[async_trait]
impl GatewayApi for MockGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn qr_scan(&self, _request: &ScanRequest) -> RetrievalResult<NavigationResponse> {
        self.scan_count.fetch_add(1, Ordering::Relaxed);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(outcome) => outcome,
            None => self.default_outcome.clone(),
        }
    }

    async fn health(&self) -> RetrievalResult<serde_json::Value> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.healthy.load(Ordering::Relaxed) {
            Ok(serde_json::json!({
                "success": true,
                "status": "ONLINE",
                "service": self.name,
            }))
        } else {
            Err(RetrievalError::network("connection refused"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Catalog;

    fn canned() -> NavigationResponse {
        let catalog = Catalog::built_in();
        let (zone, recognized) = catalog.resolve("aud_entrance");
        zone.backend_response("aud_entrance", recognized)
    }

    #[tokio::test]
    async fn test_scripted_outcomes_consumed_in_order() {
        let gateway = MockGateway::serving(canned())
            .with_outcome(Err(RetrievalError::network("reset")))
            .with_outcome(Err(RetrievalError::http_status(503)));

        let request = ScanRequest::new("aud_entrance", "test-device", "linux", "1.0.0");

        assert!(matches!(
            gateway.qr_scan(&request).await,
            Err(RetrievalError::Network { .. })
        ));
        assert!(matches!(
            gateway.qr_scan(&request).await,
            Err(RetrievalError::HttpStatus { status: 503 })
        ));
        assert!(gateway.qr_scan(&request).await.is_ok());
        assert_eq!(gateway.scan_count(), 3);
    }

    #[tokio::test]
    async fn test_health_toggle() {
        let gateway = MockGateway::serving(canned());
        assert!(gateway.health().await.is_ok());

        gateway.set_healthy(false);
        assert!(gateway.health().await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_default() {
        let gateway = MockGateway::unreachable();
        let request = ScanRequest::new("aud_entrance", "test-device", "linux", "1.0.0");

        let err = gateway.qr_scan(&request).await.unwrap_err();
        assert!(err.is_transient());
        assert!(gateway.health().await.is_err());
    }
}
