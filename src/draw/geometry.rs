use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const DEFAULT_SNAP_ANGLE_DEG: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Angular increment used when snapping straight lines, stored in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAngle(f64);

impl SnapAngle {
    /// Returns `None` unless `degrees` is finite and within (0, 180].
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if degrees.is_finite() && degrees > 0.0 && degrees <= 180.0 {
            Some(Self(degrees * PI / 180.0))
        } else {
            None
        }
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0 * 180.0 / PI
    }
}

impl Default for SnapAngle {
    fn default() -> Self {
        Self(DEFAULT_SNAP_ANGLE_DEG * PI / 180.0)
    }
}

pub fn distance(p1: Point, p2: Point) -> f64 {
    let dx = p2.x as f64 - p1.x as f64;
    let dy = p2.y as f64 - p1.y as f64;
    (dx * dx + dy * dy).sqrt()
}

pub fn angle(p1: Point, p2: Point) -> f64 {
    let dx = p2.x as f64 - p1.x as f64;
    let dy = p2.y as f64 - p1.y as f64;
    dy.atan2(dx)
}

pub fn snap(origin: Point, free: Point) -> Point {
    snap_to(origin, free, SnapAngle::default())
}

/// Keeps the distance from `origin` to `free` and rounds the direction to the
/// nearest multiple of `increment`.
pub fn snap_to(origin: Point, free: Point, increment: SnapAngle) -> Point {
    let dist = distance(origin, free);
    if dist == 0.0 {
        return origin;
    }
    let step = increment.radians();
    let snapped = (angle(origin, free) / step).round() * step;
    Point::new(
        (origin.x as f64 + dist * snapped.cos()) as f32,
        (origin.y as f64 + dist * snapped.sin()) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-3;

    fn assert_multiple_of(angle: f64, step: f64) {
        let ratio = angle / step;
        assert!(
            (ratio - ratio.round()).abs() < 1e-4,
            "angle {angle} is not a multiple of {step}"
        );
    }

    #[test]
    fn distance_and_angle_match_axis_aligned_points() {
        let origin = Point::new(0.0, 0.0);
        assert!((distance(origin, Point::new(3.0, 4.0)) - 5.0).abs() < EPS);
        assert!((angle(origin, Point::new(0.0, 10.0)) - PI / 2.0).abs() < EPS);
        assert!((angle(origin, Point::new(-10.0, 0.0)) - PI).abs() < EPS);
    }

    #[test]
    fn snap_preserves_distance_and_quantizes_angle() {
        let step = SnapAngle::default();
        let origin = Point::new(120.0, 80.0);
        let samples = [
            Point::new(300.0, 91.0),
            Point::new(121.0, 400.0),
            Point::new(-40.0, -13.5),
            Point::new(133.3, 70.2),
            Point::new(50.0, 200.0),
        ];

        for free in samples {
            let snapped = snap_to(origin, free, step);
            assert!((distance(origin, snapped) - distance(origin, free)).abs() < EPS);
            assert_multiple_of(angle(origin, snapped), step.radians());
        }
    }

    #[test]
    fn forty_five_degree_snap_rounds_near_diagonal_to_diagonal() {
        let step = SnapAngle::from_degrees(45.0).expect("valid increment");
        let snapped = snap_to(Point::new(0.0, 0.0), Point::new(10.0, 9.0), step);
        assert!((snapped.x - snapped.y).abs() < 1e-3);
    }

    #[test]
    fn snapping_onto_origin_returns_origin() {
        let origin = Point::new(5.0, 5.0);
        assert_eq!(snap(origin, origin), origin);
    }

    #[test]
    fn snap_angle_rejects_out_of_range_increments() {
        assert!(SnapAngle::from_degrees(0.0).is_none());
        assert!(SnapAngle::from_degrees(-15.0).is_none());
        assert!(SnapAngle::from_degrees(f64::NAN).is_none());
        assert!(SnapAngle::from_degrees(181.0).is_none());
        let step = SnapAngle::from_degrees(90.0).expect("valid increment");
        assert!((step.degrees() - 90.0).abs() < 1e-9);
    }
}
