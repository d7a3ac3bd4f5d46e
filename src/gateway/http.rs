//! The live HTTP gateway transport.

use crate::core::{NavigationResponse, RetrievalError, RetrievalResult, ScanRequest};
use crate::gateway::GatewayApi;

use async_trait::async_trait;
use std::time::Duration;

/// Derives the health endpoint from an API base URL.
///
/// The health endpoint lives at the server root, outside the `/api`
/// prefix the scan endpoint is mounted under.
pub(crate) fn health_url(base_url: &str) -> String {
    let root = base_url
        .trim_end_matches('/')
        .trim_end_matches("/api");
    format!("{}/health", root)
}

/// Talks to the backend gateway over HTTP.
///
/// The embedded reqwest client carries the configured timeout as a
/// backstop; the authoritative per-scan deadline is enforced by the
/// retrieval client racing the request future.
#[derive(Debug)]
pub struct HttpGateway {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Creates a transport for the given API base URL
    /// (e.g. `http://10.0.0.5:5000/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RetrievalResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                RetrievalError::configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    fn classify(&self, error: reqwest::Error) -> RetrievalError {
        if error.is_timeout() {
            RetrievalError::timeout(self.timeout)
        } else {
            RetrievalError::network(error.to_string())
        }
    }
}

#[async_trait]
impl GatewayApi for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn qr_scan(&self, request: &ScanRequest) -> RetrievalResult<NavigationResponse> {
        let url = format!("{}/qr-scan", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::http_status(status.as_u16()));
        }

        response
            .json::<NavigationResponse>()
            .await
            .map_err(|e| RetrievalError::validation(format!("undecodable body: {e}")))
    }

    async fn health(&self) -> RetrievalResult<serde_json::Value> {
        let url = health_url(&self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::http_status(status.as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| RetrievalError::validation(format!("undecodable health body: {e}")))
    }
}
