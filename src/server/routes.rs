//! Gateway request handlers.

use crate::core::{Destination, NavigationResponse, PathGeometry, ScanRequest};
use crate::server::error::ApiError;
use crate::server::{AppState, SERVICE_NAME};

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health report returned by `GET /health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Always `true` for a served report.
    pub success: bool,
    /// Liveness flag, `"ONLINE"` while serving.
    pub status: String,
    /// Service identity.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Deployment environment name.
    pub environment: String,
    /// Seconds since the gateway started.
    pub uptime: f64,
    /// Approximate process memory usage.
    pub memory: MemoryReport,
    /// When the report was generated.
    pub timestamp: DateTime<Utc>,
}

/// Approximate process memory figures for the health report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryReport {
    /// Resident set size, e.g. `"12MB"`.
    pub rss: String,
    /// Total mapped size, e.g. `"48MB"`.
    pub heap_used: String,
}

/// Reply for `GET /api/destinations/:building`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationsReply {
    /// Always `true` for a served reply.
    pub success: bool,
    /// The building that was looked up.
    pub building: String,
    /// Destinations located in the building.
    pub destinations: Vec<Destination>,
}

/// Reply for `GET /api/path/:destination_id`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathReply {
    /// Always `true` for a served reply.
    pub success: bool,
    /// The destination the path belongs to.
    pub destination_id: String,
    /// The precomputed path geometry.
    pub path: PathGeometry,
}

/// `GET /` - service identity banner.
pub(crate) async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ONLINE",
        "documentation": "See /health for liveness",
    }))
}

/// `GET /health` - liveness plus uptime and memory stats.
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        success: true,
        status: "ONLINE".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.environment.clone(),
        uptime: state.started.elapsed().as_secs_f64(),
        memory: memory_report(),
        timestamp: Utc::now(),
    })
}

/// `POST /api/qr-scan` - resolve a scanned code to navigation metadata.
///
/// Mirrors the static catalog: unknown codes still resolve to the
/// default zone, with `scannedData.isValid` cleared.
pub(crate) async fn qr_scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Json<NavigationResponse> {
    let (zone, recognized) = state.catalog.resolve(&request.qr_data);

    tracing::info!(
        qr_data = %request.qr_data,
        device_id = %request.device_id,
        target_zone = %zone.target_zone,
        recognized,
        "QR scan resolved"
    );

    Json(zone.backend_response(&request.qr_data, recognized))
}

/// `GET /api/destinations/:building` - destinations in a building.
pub(crate) async fn destinations(
    State(state): State<AppState>,
    Path(building): Path<String>,
) -> Result<Json<DestinationsReply>, ApiError> {
    let destinations = state.catalog.destinations_for_building(&building);
    if destinations.is_empty() {
        return Err(ApiError::not_found(format!("building '{building}'")));
    }

    Ok(Json(DestinationsReply {
        success: true,
        building,
        destinations,
    }))
}

/// `GET /api/path/:destination_id` - path geometry for a destination.
pub(crate) async fn destination_path(
    State(state): State<AppState>,
    Path(destination_id): Path<String>,
) -> Result<Json<PathReply>, ApiError> {
    let path = state
        .catalog
        .path_for_destination(&destination_id)
        .ok_or_else(|| ApiError::not_found(format!("destination '{destination_id}'")))?;

    Ok(Json(PathReply {
        success: true,
        destination_id,
        path,
    }))
}

/// Fallback handler for unmatched routes.
pub(crate) async fn not_found() -> ApiError {
    ApiError::not_found("route")
}

/// Reads approximate memory figures from `/proc/self/statm`.
/// Platforms without procfs report zeros.
fn memory_report() -> MemoryReport {
    const PAGE_SIZE: u64 = 4096;

    let (size_mb, resident_mb) = std::fs::read_to_string("/proc/self/statm")
        .ok()
        .and_then(|statm| {
            let mut fields = statm.split_whitespace();
            let size: u64 = fields.next()?.parse().ok()?;
            let resident: u64 = fields.next()?.parse().ok()?;
            Some((
                size * PAGE_SIZE / (1024 * 1024),
                resident * PAGE_SIZE / (1024 * 1024),
            ))
        })
        .unwrap_or((0, 0));

    MemoryReport {
        rss: format!("{resident_mb}MB"),
        heap_used: format!("{size_mb}MB"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_report_shape() {
        let report = memory_report();
        assert!(report.rss.ends_with("MB"));
        assert!(report.heap_used.ends_with("MB"));
    }
}
