//! The retrieval client.
//!
//! [`ScanClient::scan`] is the heart of the crate: it issues the scan
//! request under a hard deadline, applies the retry budget to transient
//! failures, validates whatever comes back, and degrades to locally
//! synthesized navigation data on any failure. It never returns an error
//! and never panics; the caller always gets a structurally valid
//! [`NavigationResponse`].

use crate::client::ClientConfig;
use crate::core::{NavigationResponse, ResponseSource, RetrievalError, RetrievalResult, ScanRequest};
use crate::fallback::FallbackSynthesizer;
use crate::gateway::{ArcGateway, GatewayApi, HttpGateway};

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};
use uuid::Uuid;

/// The tagged result of a single gateway attempt.
///
/// Cancellation is modeled explicitly: the request future is raced
/// against the scan deadline, and when the deadline wins the in-flight
/// request is dropped. Its late response, if one was ever produced, is
/// discarded with the future instead of being merged into state.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The gateway answered in time (body not yet validated).
    Response(NavigationResponse),
    /// The deadline fired before the gateway answered.
    Timeout {
        /// How long the attempt ran before cancellation.
        elapsed: Duration,
    },
    /// The gateway answered with a failure.
    Error(RetrievalError),
}

/// Retrieves navigation metadata for scanned QR codes.
///
/// Holds no mutable state; concurrent scans are independent and need no
/// coordination.
#[derive(Debug)]
pub struct ScanClient {
    gateway: ArcGateway,
    config: ClientConfig,
    synthesizer: FallbackSynthesizer,
}

impl ScanClient {
    /// Creates a client talking to the live HTTP gateway named in the
    /// configuration.
    pub fn new(config: ClientConfig) -> RetrievalResult<Self> {
        let gateway = HttpGateway::new(config.base_url.clone(), config.timeout)?;
        Ok(Self::with_gateway(Arc::new(gateway), config))
    }

    /// Creates a client over an arbitrary gateway transport.
    pub fn with_gateway(gateway: ArcGateway, config: ClientConfig) -> Self {
        Self {
            gateway,
            config,
            synthesizer: FallbackSynthesizer::new(),
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves a scanned code to navigation metadata.
    ///
    /// Attempts the live gateway first, under the configured deadline.
    /// Transient failures (timeout, connection error) consume the retry
    /// budget; a retry is skipped when its delay no longer fits inside
    /// the deadline. HTTP error statuses and validation failures go
    /// straight to fallback. Whatever happens, the caller receives a
    /// valid response; provenance is visible in `metadata.source`.
    pub async fn scan(&self, qr_data: &str) -> NavigationResponse {
        let scan_id = Uuid::new_v4();
        let deadline = Instant::now() + self.config.timeout;
        let max_attempts = self.config.max_retries.saturating_add(1);
        let mut attempt = 0u32;

        let failure = loop {
            attempt += 1;

            let error = match self.attempt(qr_data, deadline).await {
                AttemptOutcome::Response(mut response) => match response.validate() {
                    Ok(()) => {
                        response.metadata.backend_used = true;
                        response.metadata.source = ResponseSource::Backend;
                        tracing::info!(
                            scan_id = %scan_id,
                            qr_data,
                            attempt,
                            gateway = self.gateway.name(),
                            "Scan served by backend"
                        );
                        return response;
                    }
                    Err(e) => e,
                },
                AttemptOutcome::Timeout { elapsed } => RetrievalError::timeout(elapsed),
                AttemptOutcome::Error(e) => e,
            };

            if !error.is_transient() || attempt >= max_attempts {
                break error;
            }
            if Instant::now() + self.config.retry_delay >= deadline {
                tracing::debug!(
                    scan_id = %scan_id,
                    attempt,
                    "Retry budget remains but deadline is too close"
                );
                break error;
            }

            tracing::debug!(
                scan_id = %scan_id,
                attempt,
                max_attempts,
                error = %error,
                "Transient failure, retrying"
            );
            sleep(self.config.retry_delay).await;
        };

        tracing::warn!(
            scan_id = %scan_id,
            qr_data,
            error = %failure,
            "Backend unavailable, synthesizing offline navigation data"
        );
        self.synthesizer.synthesize(qr_data)
    }

    async fn attempt(&self, qr_data: &str, deadline: Instant) -> AttemptOutcome {
        let request = ScanRequest::new(
            qr_data,
            self.config.device_id.as_str(),
            self.config.platform.as_str(),
            self.config.app_version.as_str(),
        );

        let started = Instant::now();
        match timeout_at(deadline, self.gateway.qr_scan(&request)).await {
            Ok(Ok(response)) => AttemptOutcome::Response(response),
            Ok(Err(error)) => AttemptOutcome::Error(error),
            Err(_) => AttemptOutcome::Timeout {
                elapsed: started.elapsed(),
            },
        }
    }
}
