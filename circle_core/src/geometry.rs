//! Pure geometry over surface points.
//!
//! Surface coordinates follow screen convention: `y` grows downward, so a
//! positive angle sweeps clockwise on screen. Quadrants are numbered from the
//! angle returned by [`angle_degrees`]:
//!
//! | quadrant | angle range (deg) | on screen   |
//! |----------|-------------------|-------------|
//! | 1        | (-90, 0)          | upper right |
//! | 2        | (-180, -90)       | upper left  |
//! | 3        | (90, 180)         | lower left  |
//! | 4        | (0, 90)           | lower right |
//!
//! How the four axis angles are assigned depends on [`QuadrantBoundary`].
//! Classification uses the signs of the offsets from the center rather than
//! the rounded angle, so axis-aligned points land on the boundary exactly.

use std::f64::consts::PI;

use crate::types::Point;

/// Treatment of points lying exactly on an axis through the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuadrantBoundary {
    /// Open arcs: an angle exactly on an axis maps to 0 (undetermined).
    Strict,
    /// Arcs closed on their counter-clockwise end (in angle terms):
    /// 1 = (-90, 0], 4 = (0, 90], 3 = (90, 180], 2 = (-180, -90].
    /// Only the center itself maps to 0.
    #[default]
    HalfOpen,
}

/// Euclidean distance.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Direction of `point` seen from `center`, in degrees within (-180, 180].
/// Identical points give 0.
pub fn angle_degrees(point: Point, center: Point) -> f64 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let deg = dy.atan2(dx).to_degrees();
    // atan2(-0.0, negative) yields -180; fold it onto the closed end.
    if deg <= -180.0 { 180.0 } else { deg }
}

/// Quadrant with open arcs; on-axis points map to 0.
#[inline]
pub fn quadrant(point: Point, center: Point) -> u8 {
    quadrant_with(point, center, QuadrantBoundary::Strict)
}

/// Quadrant (1..=4, or 0) of `point` around `center` under `boundary`.
pub fn quadrant_with(point: Point, center: Point, boundary: QuadrantBoundary) -> u8 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    match boundary {
        QuadrantBoundary::Strict => match (dx > 0.0, dx < 0.0, dy > 0.0, dy < 0.0) {
            (true, _, _, true) => 1,
            (_, true, _, true) => 2,
            (_, true, true, _) => 3,
            (true, _, true, _) => 4,
            _ => 0,
        },
        QuadrantBoundary::HalfOpen => {
            if dx > 0.0 && dy <= 0.0 {
                1
            } else if dy < 0.0 && dx <= 0.0 {
                2
            } else if dx < 0.0 && dy >= 0.0 {
                3
            } else if dy > 0.0 && dx >= 0.0 {
                4
            } else {
                0
            }
        }
    }
}

/// Absolute turn between segment p0→p1 and segment p1→p2, in [0, π].
///
/// 0 means the path continues straight on; π means it doubles back.
/// Zero-length segments have direction 0.
pub fn turn_angle_delta(p0: Point, p1: Point, p2: Point) -> f64 {
    let a1 = (p1.y - p0.y).atan2(p1.x - p0.x);
    let a2 = (p2.y - p1.y).atan2(p2.x - p1.x);
    let d = (a1 - a2).abs();
    if d > PI { 2.0 * PI - d } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Point = Point::new(100.0, 100.0);

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(C, C), 0.0);
    }

    #[test]
    fn angle_covers_half_open_range() {
        assert!(approx(angle_degrees(C.offset(10.0, 0.0), C), 0.0));
        assert!(approx(angle_degrees(C.offset(0.0, 10.0), C), 90.0));
        assert!(approx(angle_degrees(C.offset(-10.0, 0.0), C), 180.0));
        assert!(approx(angle_degrees(C.offset(0.0, -10.0), C), -90.0));
        assert!(approx(angle_degrees(C.offset(10.0, -10.0), C), -45.0));
        assert_eq!(angle_degrees(C, C), 0.0);
    }

    #[test]
    fn negative_zero_does_not_produce_minus_180() {
        let p = Point::new(-5.0, -0.0);
        assert_eq!(angle_degrees(p, Point::new(0.0, 0.0)), 180.0);
    }

    #[test]
    fn turn_delta_straight_and_reversal() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        assert!(approx(turn_angle_delta(a, b, Point::new(2.0, 0.0)), 0.0));
        assert!(approx(turn_angle_delta(a, b, Point::new(0.0, 0.0)), PI));
        assert!(approx(turn_angle_delta(a, b, Point::new(1.0, 1.0)), PI / 2.0));
    }

    #[test]
    fn turn_delta_wraps_across_pi() {
        // Segment angles of +170° and -170° differ by 20°, not 340°.
        let p0 = Point::new(0.0, 0.0);
        let a1 = 170f64.to_radians();
        let p1 = p0.offset(a1.cos(), a1.sin());
        let a2 = (-170f64).to_radians();
        let p2 = p1.offset(a2.cos(), a2.sin());
        assert!(approx(turn_angle_delta(p0, p1, p2), 20f64.to_radians()));
    }

    #[test]
    fn degenerate_points_never_panic() {
        let d = turn_angle_delta(C, C, C);
        assert_eq!(d, 0.0);
    }
}
