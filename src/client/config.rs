//! Retrieval client configuration.

use std::time::Duration;

/// Configuration for the retrieval client.
///
/// Carries everything the client needs to reach the gateway plus the
/// device identity stamped onto every [`ScanRequest`](crate::core::ScanRequest).
/// Passed explicitly at construction so tests can inject deterministic
/// values; nothing here is process-wide or mutable at runtime.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL of the backend gateway, `/api` prefix included.
    pub base_url: String,

    /// Hard deadline for one whole scan, retries included.
    pub timeout: Duration,

    /// Extra attempts allowed after the first, for transient failures only.
    pub max_retries: u32,

    /// Fixed delay between attempts.
    pub retry_delay: Duration,

    /// Stable identifier of this device.
    pub device_id: String,

    /// Client platform reported to the gateway.
    pub platform: String,

    /// App version reported to the gateway.
    pub app_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            timeout: Duration::from_millis(10_000),
            max_retries: 1,
            retry_delay: Duration::from_millis(1_000),
            device_id: "navlink-mobile".to_string(),
            platform: std::env::consts::OS.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gateway API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the overall scan deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of extra attempts after the first.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the fixed delay between attempts.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the device identifier.
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = device_id.into();
        self
    }
}
