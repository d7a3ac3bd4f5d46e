//! Structured error envelopes for the gateway.
//!
//! Every failure a handler can produce flows through [`ApiError`], so
//! clients always see the same JSON envelope shape whether the resource
//! was missing or the handler faulted. No error ever takes the process
//! down; a fault in one request stays in that request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// The error type for gateway request handling.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Description of what was looked up.
        resource: String,
    },

    /// The handler hit an unexpected fault.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the fault.
        message: String,
    },
}

impl ApiError {
    /// Creates a `NotFound` error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// The JSON envelope sent for every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    success: bool,
    error: String,
    message: String,
    timestamp: DateTime<Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "Not Found"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        if let Self::Internal { message } = &self {
            tracing::error!(message = %message, "Request handler fault");
        }

        let envelope = ErrorEnvelope {
            success: false,
            error: error.to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ApiError::not_found("destination 'x'").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display_names_the_resource() {
        let err = ApiError::not_found("building 'Gymnasium'");
        assert!(err.to_string().contains("Gymnasium"));
    }
}
