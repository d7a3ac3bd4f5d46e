//! The backend gateway.
//!
//! An HTTP server exposing the fixed scan contract over the static
//! navigation catalog:
//!
//! - `POST /api/qr-scan` - resolve a scanned code
//! - `GET /api/destinations/:building` - destinations in a building
//! - `GET /api/path/:destination_id` - path geometry lookup
//! - `GET /health` - liveness, uptime, memory
//! - `GET /` - identity banner
//!
//! Requests are stateless and independent; the catalog is immutable and
//! shared, so no cross-request locking exists. Termination signals drain
//! in-flight requests and exit cleanly.

pub mod error;
pub mod routes;

use crate::core::Catalog;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-exports
pub use error::ApiError;
pub use routes::{DestinationsReply, HealthReport, MemoryReport, PathReply};

/// Service identity reported by the banner and health endpoints.
pub const SERVICE_NAME: &str = "navlink-gateway";

/// Configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// TCP port to listen on.
    pub port: u16,
    /// Deployment environment name reported by `/health`.
    pub environment: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            environment: "development".to_string(),
        }
    }
}

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub(crate) struct AppState {
    /// The immutable navigation catalog.
    pub catalog: Arc<Catalog>,
    /// When the gateway started, for uptime reporting.
    pub started: Instant,
    /// Deployment environment name.
    pub environment: String,
}

/// Builds the gateway router with a fresh catalog.
///
/// Every request is traced at the router level, so handlers only log
/// domain events. CORS is permissive: the clients are mobile apps on
/// arbitrary local networks.
pub fn router(config: &GatewayConfig) -> Router {
    let state = AppState {
        catalog: Arc::new(Catalog::built_in()),
        started: Instant::now(),
        environment: config.environment.clone(),
    };

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/api/qr-scan", post(routes::qr_scan))
        .route("/api/destinations/:building", get(routes::destinations))
        .route("/api/path/:destination_id", get(routes::destination_path))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listener and serves until a termination signal arrives.
///
/// Returns a startup error when binding fails; once serving, handler
/// faults are contained per request and never reach this level.
pub async fn serve(config: GatewayConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        environment = %config.environment,
        "Gateway listening"
    );

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Termination signal received, draining in-flight requests");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientConfig, ScanClient, StatusProber};
    use crate::core::{NavigationResponse, ResponseSource, ScanRequest};
    use std::time::Duration;

    /// Serves the gateway on an ephemeral port, returning its root URL.
    async fn spawn_gateway() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(&GatewayConfig::default());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_health_reports_online_with_numeric_uptime() {
        let base = spawn_gateway().await;

        let body: serde_json::Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "ONLINE");
        assert_eq!(body["success"], true);
        assert!(body["uptime"].is_number());
        assert!(body["memory"]["rss"].is_string());
        assert!(body["environment"].is_string());
    }

    #[tokio::test]
    async fn test_root_banner() {
        let base = spawn_gateway().await;

        let body: serde_json::Value = reqwest::get(&base).await.unwrap().json().await.unwrap();
        assert_eq!(body["service"], SERVICE_NAME);
        assert_eq!(body["status"], "ONLINE");
    }

    #[tokio::test]
    async fn test_qr_scan_round_trip() {
        let base = spawn_gateway().await;
        let request = ScanRequest::new("aud_entrance", "test-device", "linux", "1.0.0");

        let response: NavigationResponse = reqwest::Client::new()
            .post(format!("{base}/api/qr-scan"))
            .json(&request)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert!(response.is_valid());
        assert!(response.metadata.backend_used);
        assert_eq!(response.navigation.map_image, "auditorium_map.png");
        assert!(response.scanned_data.is_valid);
    }

    #[tokio::test]
    async fn test_unknown_building_yields_404_envelope() {
        let base = spawn_gateway().await;

        let response = reqwest::get(format!("{base}/api/destinations/Gymnasium"))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Not Found");
    }

    #[tokio::test]
    async fn test_path_lookup() {
        let base = spawn_gateway().await;

        let body: serde_json::Value = reqwest::get(format!("{base}/api/path/aud_stage"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["path"]["stepProgress"], 5.714);

        let missing = reqwest::get(format!("{base}/api/path/no_such_place"))
            .await
            .unwrap();
        assert_eq!(missing.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_unmatched_route_yields_404_envelope() {
        let base = spawn_gateway().await;

        let response = reqwest::get(format!("{base}/api/unknown")).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_every_route_emits_request_traces() {
        #[derive(Clone, Default)]
        struct CaptureLog(Arc<std::sync::Mutex<Vec<u8>>>);

        impl std::io::Write for CaptureLog {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CaptureLog {
            type Writer = CaptureLog;

            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        let sink = CaptureLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(sink.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let base = spawn_gateway().await;
        // A route whose handler logs nothing itself; the trace must come
        // from the router middleware.
        reqwest::get(format!("{base}/health")).await.unwrap();

        let log = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("tower_http::trace"), "no request trace in: {log}");
    }

    #[tokio::test]
    async fn test_scan_client_end_to_end_against_live_gateway() {
        let base = spawn_gateway().await;
        let config = ClientConfig::new()
            .with_base_url(format!("{base}/api"))
            .with_timeout(Duration::from_secs(2));

        let client = ScanClient::new(config.clone()).unwrap();
        let response = client.scan("lib_gate_3").await;

        assert!(response.metadata.backend_used);
        assert_eq!(response.metadata.source, ResponseSource::Backend);
        assert_eq!(response.navigation.map_image, "library_map.png");

        let prober = StatusProber::new(&config).unwrap();
        let status = prober.check().await;
        assert!(status.online);
        assert_eq!(status.health.unwrap()["status"], "ONLINE");
    }
}
