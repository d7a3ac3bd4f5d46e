//! Error types for metadata retrieval.
//!
//! Every failure mode a scan can hit on the client side is captured here
//! as a structured variant. None of these errors ever reach the caller of
//! [`ScanClient::scan`](crate::client::ScanClient::scan); they are
//! absorbed at the client boundary and converted into a fallback result.

use std::time::Duration;
use thiserror::Error;

/// The error type for client-side retrieval operations.
#[derive(Debug, Clone, Error)]
pub enum RetrievalError {
    /// The gateway could not be reached (connection refused, DNS, etc.).
    #[error("network error: {message}")]
    Network {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// The request exceeded its deadline and was abandoned.
    #[error("request timed out after {elapsed:?}")]
    Timeout {
        /// How long the attempt ran before being cancelled.
        elapsed: Duration,
    },

    /// The gateway answered with a non-2xx status.
    #[error("gateway returned HTTP status {status}")]
    HttpStatus {
        /// The HTTP status code received.
        status: u16,
    },

    /// The gateway answered 2xx but the body fails the navigation
    /// invariants (missing navigation block, empty map image, bad JSON).
    #[error("invalid navigation payload: {reason}")]
    Validation {
        /// What was wrong with the payload.
        reason: String,
    },

    /// The client itself was misconfigured.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl RetrievalError {
    /// Creates a `Network` error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a `Timeout` error.
    pub fn timeout(elapsed: Duration) -> Self {
        Self::Timeout { elapsed }
    }

    /// Creates an `HttpStatus` error.
    pub fn http_status(status: u16) -> Self {
        Self::HttpStatus { status }
    }

    /// Creates a `Validation` error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if retrying the request could plausibly succeed.
    ///
    /// Only transport-level failures are transient. A 2xx body that fails
    /// validation, or a definite HTTP error status, will not improve on a
    /// second attempt, so those never consume the retry budget.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }
}

/// A specialized `Result` type for retrieval operations.
pub type RetrievalResult<T> = Result<T, RetrievalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(RetrievalError::network("connection refused").is_transient());
        assert!(RetrievalError::timeout(Duration::from_secs(10)).is_transient());

        assert!(!RetrievalError::http_status(503).is_transient());
        assert!(!RetrievalError::validation("mapImage is empty").is_transient());
        assert!(!RetrievalError::configuration("bad base url").is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = RetrievalError::http_status(404);
        assert!(err.to_string().contains("404"));

        let err = RetrievalError::validation("navigation.mapImage is empty");
        assert!(err.to_string().contains("mapImage"));
    }
}
