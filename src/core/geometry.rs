//! Path geometry for on-device progress tracking.
//!
//! A [`PathGeometry`] is the static shape of one navigable path segment:
//! the waypoint sequence drawn on the map image, the rectangular clamp
//! region the tracked position must stay inside, and the calibration
//! factors the mobile client uses to convert pedometer steps into pixels
//! advanced along the path.

use serde::{Deserialize, Serialize};

/// Allowed drift between `step_progress` and its derivation from
/// `pixels_per_meter * step_calibration`, in pixels per step.
pub const CALIBRATION_TOLERANCE: f64 = 0.01;

/// A pixel coordinate on the map image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the map image the path is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Image width in pixels.
    pub width: f64,
    /// Image height in pixels.
    pub height: f64,
}

/// The rectangular region within which all path points and computed
/// progress positions must remain valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClampBounds {
    /// Minimum valid x coordinate.
    pub min_x: f64,
    /// Maximum valid x coordinate.
    pub max_x: f64,
    /// Minimum valid y coordinate.
    pub min_y: f64,
    /// Maximum valid y coordinate.
    pub max_y: f64,
}

impl ClampBounds {
    /// Returns `true` if the point lies within the bounds (inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Clamps a point into the bounds.
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.min_x, self.max_x),
            y: point.y.clamp(self.min_y, self.max_y),
        }
    }
}

/// The static shape describing a navigable path segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathGeometry {
    /// Dimensions of the map image the coordinates refer to.
    pub image_dimensions: ImageDimensions,

    /// Ordered waypoints along the path, step-aligned.
    pub points: Vec<Point>,

    /// Vector-path descriptor of the segment (SVG `M … L …` syntax).
    pub path_string: String,

    /// Region all points and progress positions must stay inside.
    pub clamp_bounds: ClampBounds,

    /// Meters of real-world travel attributed to one detected footstep.
    pub step_calibration: f64,

    /// Map scale: pixels per real-world meter.
    pub pixels_per_meter: f64,

    /// Pixels advanced along the path per detected step. Derived from
    /// `pixels_per_meter * step_calibration`, never independently
    /// authoritative.
    pub step_progress: f64,

    /// Maximum pixel deviation from the path before the client must
    /// re-localize.
    pub allowed_deviation: f64,
}

impl PathGeometry {
    /// Returns `true` if every waypoint lies within the clamp bounds.
    pub fn points_within_bounds(&self) -> bool {
        self.points.iter().all(|p| self.clamp_bounds.contains(*p))
    }

    /// Returns `true` if `step_progress` agrees with its derivation from
    /// the calibration factors, within [`CALIBRATION_TOLERANCE`].
    pub fn is_calibration_consistent(&self) -> bool {
        let derived = self.pixels_per_meter * self.step_calibration;
        (self.step_progress - derived).abs() <= CALIBRATION_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> ClampBounds {
        ClampBounds {
            min_x: 145.0,
            max_x: 155.0,
            min_y: 40.0,
            max_y: 280.0,
        }
    }

    #[test]
    fn test_bounds_contains() {
        let b = bounds();
        assert!(b.contains(Point::new(150.0, 280.0)));
        assert!(b.contains(Point::new(145.0, 40.0)));
        assert!(!b.contains(Point::new(144.9, 100.0)));
        assert!(!b.contains(Point::new(150.0, 281.0)));
    }

    #[test]
    fn test_bounds_clamp() {
        let b = bounds();
        let clamped = b.clamp(Point::new(200.0, 10.0));
        assert_eq!(clamped, Point::new(155.0, 40.0));
    }

    #[test]
    fn test_calibration_consistency() {
        let geometry = PathGeometry {
            image_dimensions: ImageDimensions {
                width: 300.0,
                height: 300.0,
            },
            points: vec![Point::new(150.0, 280.0)],
            path_string: "M150,280 L150,40".to_string(),
            clamp_bounds: bounds(),
            step_calibration: 0.7619,
            pixels_per_meter: 7.5,
            step_progress: 5.714,
            allowed_deviation: 25.0,
        };
        // 7.5 * 0.7619 = 5.71425, within tolerance of the rounded value
        assert!(geometry.is_calibration_consistent());

        let mut skewed = geometry.clone();
        skewed.step_progress = 6.0;
        assert!(!skewed.is_calibration_consistent());
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let b = bounds();
        let json = serde_json::to_value(b).unwrap();
        assert!(json.get("minX").is_some());
        assert!(json.get("maxY").is_some());
    }
}
