//! Wire data model for the scan protocol.
//!
//! These types mirror the JSON contract between the mobile client and the
//! backend gateway. Field names on the wire are camelCase, matching what
//! the mobile app ships with; the serde attributes keep the Rust side
//! idiomatic.

use crate::core::geometry::{PathGeometry, Point};
use crate::core::RetrievalError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scan request sent to the gateway. Constructed fresh per call and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// The decoded QR code string.
    pub qr_data: String,
    /// Stable identifier of the requesting device.
    pub device_id: String,
    /// Client platform ("ios", "android", "linux", ...).
    pub platform: String,
    /// Version of the requesting app.
    pub app_version: String,
    /// When the scan happened.
    pub timestamp: DateTime<Utc>,
}

impl ScanRequest {
    /// Creates a request for the given code, stamped with the current time.
    pub fn new(
        qr_data: impl Into<String>,
        device_id: impl Into<String>,
        platform: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            qr_data: qr_data.into(),
            device_id: device_id.into(),
            platform: platform.into(),
            app_version: app_version.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Where a navigation response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// Live data from the backend gateway.
    Backend,
    /// Synthesized locally with no network involved.
    OfflineFallback,
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend => write!(f, "backend"),
            Self::OfflineFallback => write!(f, "offline_fallback"),
        }
    }
}

/// Details of the scanned location as resolved by the gateway (or the
/// fallback synthesizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedLocation {
    /// The raw code that was scanned.
    pub qr_code: String,
    /// Identifier of the physical scan point.
    pub scanned_location: String,
    /// Human-readable area name.
    pub area: String,
    /// Zone key used for destination lookup.
    pub target_zone: String,
    /// Whether the code was recognized.
    pub is_valid: bool,
    /// Display name of the scan point.
    pub name: String,
    /// When the location was resolved.
    pub timestamp: DateTime<Utc>,
    /// Map image asset associated with the location.
    pub map_image: String,
}

/// A navigable destination with its precomputed path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Stable destination identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Expected step count from the scan point to the destination.
    pub total_steps: u32,
    /// Real-world distance in meters.
    pub distance_meters: f64,
    /// Initial heading in degrees, `[0, 360)`.
    pub path_angle: f64,
    /// Precomputed path geometry for progress tracking.
    pub svg_path: PathGeometry,
}

/// The navigation block of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    /// Building the navigation takes place in.
    pub building: String,
    /// Map image asset the client must resolve locally.
    pub map_image: String,
    /// Starting pixel coordinate on the map image.
    pub start_node: Point,
    /// The destination and its path.
    pub stage_destination: Destination,
}

/// Provenance metadata attached to every response. Created fresh per
/// scan, never cached or merged across scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Whether the live backend produced this response.
    pub backend_used: bool,
    /// Provenance of the response data.
    pub source: ResponseSource,
    /// Human-readable note about how navigation will proceed.
    pub note: String,
}

/// The complete navigation metadata bundle returned for a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    /// Success flag set by the producer. Not authoritative on its own;
    /// see [`NavigationResponse::validate`].
    pub success: bool,
    /// The resolved scan location.
    pub scanned_data: ScannedLocation,
    /// Navigation metadata for the client.
    pub navigation: Navigation,
    /// Provenance metadata.
    pub metadata: ResponseMetadata,
}

impl NavigationResponse {
    /// Checks the structural invariant: `success == true` implies a
    /// non-empty `navigation.mapImage` the client can resolve locally.
    ///
    /// A response failing this must be treated as invalid regardless of
    /// its `success` flag.
    pub fn validate(&self) -> Result<(), RetrievalError> {
        if !self.success {
            return Err(RetrievalError::validation("success flag not set"));
        }
        if self.navigation.map_image.trim().is_empty() {
            return Err(RetrievalError::validation("navigation.mapImage is empty"));
        }
        Ok(())
    }

    /// Returns `true` if [`validate`](Self::validate) passes.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    #[test]
    fn test_scan_request_wire_names() {
        let request = ScanRequest::new("aud_entrance", "navlink-mobile", "linux", "1.0.0");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["qrData"], "aud_entrance");
        assert_eq!(json["deviceId"], "navlink-mobile");
        assert!(json.get("appVersion").is_some());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_response_source_wire_values() {
        assert_eq!(
            serde_json::to_value(ResponseSource::OfflineFallback).unwrap(),
            "offline_fallback"
        );
        assert_eq!(serde_json::to_value(ResponseSource::Backend).unwrap(), "backend");
        assert_eq!(ResponseSource::OfflineFallback.to_string(), "offline_fallback");
    }

    #[test]
    fn test_validate_rejects_empty_map_image() {
        let catalog = Catalog::built_in();
        let (profile, _) = catalog.resolve("aud_entrance");
        let mut response = profile.backend_response("aud_entrance", true);
        assert!(response.is_valid());

        response.navigation.map_image = String::new();
        assert!(!response.is_valid());

        response.navigation.map_image = "   ".to_string();
        assert!(!response.is_valid());
    }

    #[test]
    fn test_validate_rejects_unset_success_flag() {
        let catalog = Catalog::built_in();
        let (profile, _) = catalog.resolve("aud_entrance");
        let mut response = profile.backend_response("aud_entrance", true);
        response.success = false;
        assert!(matches!(
            response.validate(),
            Err(RetrievalError::Validation { .. })
        ));
    }

    #[test]
    fn test_response_round_trips_through_json() {
        let catalog = Catalog::built_in();
        let (profile, _) = catalog.resolve("aud_entrance");
        let response = profile.backend_response("aud_entrance", true);

        let json = serde_json::to_string(&response).unwrap();
        let decoded: NavigationResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, response);
        assert!(json.contains("\"stageDestination\""));
        assert!(json.contains("\"backendUsed\""));
    }
}
