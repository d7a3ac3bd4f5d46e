//! The static navigation catalog.
//!
//! All navigation data in the system is static: a small set of zone
//! profiles, each tying recognized QR codes to a building, a map image,
//! and the parameters of one precomputed path. The backend gateway serves
//! this catalog over HTTP; the fallback synthesizer carries the same
//! profiles built in, so both sides of the protocol produce identical
//! path geometry.

use crate::core::geometry::{ClampBounds, ImageDimensions, PathGeometry, Point};
use crate::core::types::{
    Destination, Navigation, NavigationResponse, ResponseMetadata, ResponseSource,
    ScannedLocation,
};

use chrono::Utc;

/// The axis a straight path segment runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAxis {
    /// The path advances along the x axis.
    Horizontal,
    /// The path advances along the y axis.
    Vertical,
}

/// One zone of the catalog: a scan point, its destination, and the
/// parameters from which the path geometry is generated.
#[derive(Debug, Clone)]
pub struct ZoneProfile {
    /// Zone key used for destination lookup (`targetZone` on the wire).
    pub target_zone: String,
    /// QR codes starting with any of these prefixes resolve to this zone.
    pub qr_prefixes: Vec<String>,
    /// Building the zone belongs to.
    pub building: String,
    /// Human-readable area name.
    pub area: String,
    /// Identifier of the physical scan point.
    pub scan_point: String,
    /// Display name of the scan point.
    pub scan_point_name: String,
    /// Map image asset for the zone.
    pub map_image: String,
    /// Stable destination identifier.
    pub destination_id: String,
    /// Destination display title.
    pub destination_title: String,
    /// Expected step count along the path.
    pub total_steps: u32,
    /// Real-world path length in meters.
    pub distance_meters: f64,
    /// Initial heading in degrees, `[0, 360)`.
    pub path_angle: f64,
    /// Dimensions of the map image.
    pub image_dimensions: ImageDimensions,
    /// Clamp region for the path.
    pub clamp_bounds: ClampBounds,
    /// First waypoint of the path, in map pixels.
    pub path_origin: Point,
    /// Axis the path runs along.
    pub axis: PathAxis,
    /// Direction along the axis: `1.0` (increasing) or `-1.0`.
    pub direction: f64,
    /// Meters advanced per detected step.
    pub step_calibration: f64,
    /// Map scale in pixels per meter.
    pub pixels_per_meter: f64,
    /// Maximum allowed pixel deviation from the path.
    pub allowed_deviation: f64,
    /// Starting node reported to the client (`navigation.startNode`).
    pub start_node: Point,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

impl ZoneProfile {
    /// The built-in "auditorium stage" zone. This is also the default
    /// profile for unrecognized codes.
    pub fn auditorium() -> Self {
        Self {
            target_zone: "auditorium".to_string(),
            qr_prefixes: vec!["aud".to_string()],
            building: "Auditorium".to_string(),
            area: "Auditorium".to_string(),
            scan_point: "auditorium_main_gate".to_string(),
            scan_point_name: "GD Birla Auditorium Main Entrance".to_string(),
            map_image: "auditorium_map.png".to_string(),
            destination_id: "aud_stage".to_string(),
            destination_title: "Auditorium Stage".to_string(),
            total_steps: 42,
            distance_meters: 32.0,
            path_angle: 171.0,
            image_dimensions: ImageDimensions {
                width: 300.0,
                height: 300.0,
            },
            clamp_bounds: ClampBounds {
                min_x: 145.0,
                max_x: 155.0,
                min_y: 40.0,
                max_y: 280.0,
            },
            path_origin: Point::new(150.0, 280.0),
            axis: PathAxis::Vertical,
            direction: -1.0,
            step_calibration: 0.7619,
            pixels_per_meter: 7.5,
            allowed_deviation: 25.0,
            start_node: Point::new(0.0, 0.0),
        }
    }

    /// The built-in "library reading room" zone.
    pub fn library() -> Self {
        Self {
            target_zone: "library".to_string(),
            qr_prefixes: vec!["lib".to_string()],
            building: "Library".to_string(),
            area: "Central Library".to_string(),
            scan_point: "library_west_entrance".to_string(),
            scan_point_name: "Central Library West Entrance".to_string(),
            map_image: "library_map.png".to_string(),
            destination_id: "lib_reading_room".to_string(),
            destination_title: "Reading Room".to_string(),
            total_steps: 30,
            distance_meters: 22.5,
            path_angle: 90.0,
            image_dimensions: ImageDimensions {
                width: 300.0,
                height: 300.0,
            },
            clamp_bounds: ClampBounds {
                min_x: 40.0,
                max_x: 210.0,
                min_y: 145.0,
                max_y: 155.0,
            },
            path_origin: Point::new(40.0, 150.0),
            axis: PathAxis::Horizontal,
            direction: 1.0,
            step_calibration: 0.75,
            pixels_per_meter: 7.5,
            allowed_deviation: 25.0,
            start_node: Point::new(0.0, 0.0),
        }
    }

    /// Returns `true` if the scanned code belongs to this zone.
    pub fn matches(&self, qr_data: &str) -> bool {
        self.qr_prefixes
            .iter()
            .any(|prefix| qr_data.starts_with(prefix.as_str()))
    }

    /// Pixels advanced along the path per detected step, derived from
    /// the calibration factors and rounded to wire precision.
    pub fn step_progress(&self) -> f64 {
        round3(self.pixels_per_meter * self.step_calibration)
    }

    /// Generates the path geometry procedurally.
    ///
    /// Produces `total_steps + 1` waypoints starting at the path origin,
    /// consecutive points exactly one `step_progress` apart along the
    /// dominant axis, every point clamped into the bounds.
    pub fn geometry(&self) -> PathGeometry {
        let step_progress = self.step_progress();
        let mut points = Vec::with_capacity(self.total_steps as usize + 1);
        for i in 0..=self.total_steps {
            let offset = self.direction * step_progress * f64::from(i);
            let raw = match self.axis {
                PathAxis::Horizontal => {
                    Point::new(self.path_origin.x + offset, self.path_origin.y)
                }
                PathAxis::Vertical => {
                    Point::new(self.path_origin.x, self.path_origin.y + offset)
                }
            };
            points.push(self.clamp_bounds.clamp(raw));
        }

        let first = points[0];
        let last = points[points.len() - 1];
        let path_string = format!(
            "M{},{} L{},{}",
            round3(first.x),
            round3(first.y),
            round3(last.x),
            round3(last.y)
        );

        PathGeometry {
            image_dimensions: self.image_dimensions,
            points,
            path_string,
            clamp_bounds: self.clamp_bounds,
            step_calibration: self.step_calibration,
            pixels_per_meter: self.pixels_per_meter,
            step_progress,
            allowed_deviation: self.allowed_deviation,
        }
    }

    /// Builds the destination block, geometry included.
    pub fn destination(&self) -> Destination {
        Destination {
            id: self.destination_id.clone(),
            title: self.destination_title.clone(),
            total_steps: self.total_steps,
            distance_meters: self.distance_meters,
            path_angle: self.path_angle,
            svg_path: self.geometry(),
        }
    }

    /// Builds the navigation block for this zone.
    pub fn navigation(&self) -> Navigation {
        Navigation {
            building: self.building.clone(),
            map_image: self.map_image.clone(),
            start_node: self.start_node,
            stage_destination: self.destination(),
        }
    }

    /// Builds the scanned-location block for a scanned code.
    pub fn scanned_location(&self, qr_data: &str, recognized: bool) -> ScannedLocation {
        ScannedLocation {
            qr_code: qr_data.to_string(),
            scanned_location: self.scan_point.clone(),
            area: self.area.clone(),
            target_zone: self.target_zone.clone(),
            is_valid: recognized,
            name: self.scan_point_name.clone(),
            timestamp: Utc::now(),
            map_image: self.map_image.clone(),
        }
    }

    /// Builds a complete live-backend response for a scanned code.
    pub fn backend_response(&self, qr_data: &str, recognized: bool) -> NavigationResponse {
        NavigationResponse {
            success: true,
            scanned_data: self.scanned_location(qr_data, recognized),
            navigation: self.navigation(),
            metadata: ResponseMetadata {
                backend_used: true,
                source: ResponseSource::Backend,
                note: "Served from the static navigation catalog".to_string(),
            },
        }
    }
}

/// The full set of zone profiles known to the system.
#[derive(Debug, Clone)]
pub struct Catalog {
    zones: Vec<ZoneProfile>,
}

impl Catalog {
    /// Creates the catalog of built-in zones. The first zone doubles as
    /// the default for unrecognized codes.
    pub fn built_in() -> Self {
        Self {
            zones: vec![ZoneProfile::auditorium(), ZoneProfile::library()],
        }
    }

    /// Returns all zones.
    pub fn zones(&self) -> &[ZoneProfile] {
        &self.zones
    }

    /// Resolves a scanned code to a zone.
    ///
    /// Returns the matching profile and `true` when the code is
    /// recognized; otherwise the default profile and `false`.
    pub fn resolve(&self, qr_data: &str) -> (&ZoneProfile, bool) {
        match self.zones.iter().find(|zone| zone.matches(qr_data)) {
            Some(zone) => (zone, true),
            None => (&self.zones[0], false),
        }
    }

    /// Returns the destinations located in a building, matched
    /// case-insensitively.
    pub fn destinations_for_building(&self, building: &str) -> Vec<Destination> {
        self.zones
            .iter()
            .filter(|zone| zone.building.eq_ignore_ascii_case(building))
            .map(ZoneProfile::destination)
            .collect()
    }

    /// Returns the path geometry for a destination id, if known.
    pub fn path_for_destination(&self, destination_id: &str) -> Option<PathGeometry> {
        self.zones
            .iter()
            .find(|zone| zone.destination_id == destination_id)
            .map(ZoneProfile::geometry)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::built_in()
    }
}
