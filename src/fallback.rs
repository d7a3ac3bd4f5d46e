//! Offline fallback synthesis.
//!
//! When the backend is unreachable, times out, or returns an invalid
//! payload, the client still has to hand the caller a complete,
//! structurally valid navigation bundle. The synthesizer builds one
//! locally from the built-in catalog: pure lookup plus procedural
//! geometry, no I/O, deterministic for a given code (only the timestamps
//! differ between calls).

use crate::core::{
    Catalog, NavigationResponse, ResponseMetadata, ResponseSource,
};

/// Advisory note attached to every synthesized response.
const OFFLINE_NOTE: &str =
    "Navigation will use device sensors (pedometer, gyroscope, magnetometer)";

/// Builds complete navigation responses without touching the network.
#[derive(Debug, Clone, Default)]
pub struct FallbackSynthesizer {
    catalog: Catalog,
}

impl FallbackSynthesizer {
    /// Creates a synthesizer over the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::built_in(),
        }
    }

    /// Synthesizes a canonical navigation response for a scanned code.
    ///
    /// Recognized codes resolve to their zone; anything else gets the
    /// default "auditorium stage" profile with `scannedData.isValid`
    /// cleared. The result always passes
    /// [`NavigationResponse::validate`].
    pub fn synthesize(&self, qr_data: &str) -> NavigationResponse {
        let (zone, recognized) = self.catalog.resolve(qr_data);

        NavigationResponse {
            success: true,
            scanned_data: zone.scanned_location(qr_data, recognized),
            navigation: zone.navigation(),
            metadata: ResponseMetadata {
                backend_used: false,
                source: ResponseSource::OfflineFallback,
                note: OFFLINE_NOTE.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_response_is_always_valid() {
        let synthesizer = FallbackSynthesizer::new();
        for code in ["aud_entrance", "lib_gate_3", "", "garbage-#!@", "unknown_wing"] {
            let response = synthesizer.synthesize(code);
            assert!(response.is_valid(), "invalid synthesis for {code:?}");
            assert!(!response.metadata.backend_used);
            assert_eq!(
                response.metadata.source,
                ResponseSource::OfflineFallback
            );
        }
    }

    #[test]
    fn test_auditorium_scenario_constants() {
        let synthesizer = FallbackSynthesizer::new();
        let response = synthesizer.synthesize("aud_entrance");

        assert_eq!(response.navigation.map_image, "auditorium_map.png");
        assert_eq!(response.navigation.stage_destination.total_steps, 42);
        assert_eq!(response.navigation.stage_destination.distance_meters, 32.0);
        assert_eq!(response.metadata.source.to_string(), "offline_fallback");
        assert!(response.scanned_data.is_valid);
    }

    #[test]
    fn test_unrecognized_code_gets_default_zone() {
        let synthesizer = FallbackSynthesizer::new();
        let response = synthesizer.synthesize("cafeteria_north");

        assert_eq!(response.scanned_data.target_zone, "auditorium");
        assert!(!response.scanned_data.is_valid);
        assert_eq!(response.scanned_data.qr_code, "cafeteria_north");
    }

    #[test]
    fn test_synthesis_is_deterministic_modulo_timestamp() {
        let synthesizer = FallbackSynthesizer::new();
        let first = synthesizer.synthesize("lib_gate_3");
        let second = synthesizer.synthesize("lib_gate_3");

        assert_eq!(
            first.navigation.stage_destination.svg_path.points,
            second.navigation.stage_destination.svg_path.points
        );
        assert_eq!(first.navigation, second.navigation);
        assert_eq!(first.metadata, second.metadata);
    }

    #[test]
    fn test_geometry_invariants_hold() {
        let synthesizer = FallbackSynthesizer::new();
        let geometry = synthesizer
            .synthesize("lib_gate_3")
            .navigation
            .stage_destination
            .svg_path;

        assert!(geometry.points_within_bounds());
        assert!(geometry.is_calibration_consistent());
        for pair in geometry.points.windows(2) {
            let dx = (pair[1].x - pair[0].x).abs();
            assert!((dx - geometry.step_progress).abs() < 1e-9);
        }
    }
}
