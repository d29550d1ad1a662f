//! Scoring: per-sample fit to the ideal radius and whole-trace roundness.

use crate::geometry::distance;
use crate::types::{AnalyzedSample, Point};

/// Fit of a single point to the ideal circle, in [0, 100].
///
/// 100 on the circle, falling linearly with radial error, 0 once the error
/// reaches the ideal radius. A non-positive ideal radius scores 0.
pub fn point_accuracy(point: Point, center: Point, ideal_radius: f64) -> f64 {
    if !(ideal_radius.is_finite() && ideal_radius > 0.0) {
        return 0.0;
    }
    let error = (distance(point, center) - ideal_radius).abs();
    ((1.0 - error / ideal_radius) * 100.0).clamp(0.0, 100.0)
}

/// Roundness of a whole trace, in [0, 100].
///
/// `100 - (max_radius - mean_radius) / mean_radius * 100`, floored at 0.
/// Independent of the ideal radius. Empty input scores 0.
pub fn aggregate_accuracy<I>(points: I, center: Point) -> f64
where
    I: IntoIterator<Item = Point>,
{
    let mut n = 0usize;
    let mut sum = 0.0f64;
    let mut max = 0.0f64;
    for p in points {
        let d = distance(p, center);
        n += 1;
        sum += d;
        max = max.max(d);
    }
    if n == 0 {
        return 0.0;
    }
    let mean = sum / n as f64;
    if !(mean.is_finite() && mean > 0.0) {
        return 0.0;
    }
    let deviation_pct = (max - mean).max(0.0) / mean * 100.0;
    (100.0 - deviation_pct).clamp(0.0, 100.0)
}

/// Aggregate over analyzed history.
#[inline]
pub fn history_accuracy(history: &[AnalyzedSample], center: Point) -> f64 {
    aggregate_accuracy(history.iter().map(AnalyzedSample::point), center)
}

/// Spread of per-sample accuracy across a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracySummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// Min/mean/max of per-sample accuracy; `None` for an empty history.
pub fn summarize(history: &[AnalyzedSample]) -> Option<AccuracySummary> {
    if history.is_empty() {
        return None;
    }
    let (min, max, sum) = history.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(lo, hi, s), a| (lo.min(a.accuracy), hi.max(a.accuracy), s + a.accuracy),
    );
    Some(AccuracySummary {
        min,
        mean: sum / history.len() as f64,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::QuadrantBoundary;
    use crate::types::Sample;

    const C: Point = Point::new(0.0, 0.0);

    #[test]
    fn on_circle_is_perfect() {
        assert_eq!(point_accuracy(Point::new(30.0, 40.0), C, 50.0), 100.0);
    }

    #[test]
    fn error_degrades_linearly_and_floors_at_zero() {
        assert!((point_accuracy(Point::new(55.0, 0.0), C, 50.0) - 90.0).abs() < 1e-9);
        assert!((point_accuracy(Point::new(45.0, 0.0), C, 50.0) - 90.0).abs() < 1e-9);
        assert_eq!(point_accuracy(Point::new(150.0, 0.0), C, 50.0), 0.0);
    }

    #[test]
    fn zero_ideal_radius_scores_zero() {
        assert_eq!(point_accuracy(Point::new(1.0, 0.0), C, 0.0), 0.0);
        assert_eq!(point_accuracy(Point::new(1.0, 0.0), C, f64::NAN), 0.0);
    }

    #[test]
    fn aggregate_of_empty_is_zero() {
        assert_eq!(aggregate_accuracy(std::iter::empty(), C), 0.0);
    }

    #[test]
    fn aggregate_measures_dispersion() {
        // radii 40, 60 -> mean 50, max 60 -> 100 - 20 = 80
        let pts = [Point::new(40.0, 0.0), Point::new(0.0, 60.0)];
        assert!((aggregate_accuracy(pts, C) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn summary_tracks_extremes() {
        let h: Vec<_> = [50.0, 55.0, 60.0]
            .iter()
            .map(|&r| {
                AnalyzedSample::analyze(Sample::new(r, 0.0, 0), C, 50.0, QuadrantBoundary::HalfOpen)
            })
            .collect();
        let s = summarize(&h).expect("non-empty");
        assert_eq!(s.max, 100.0);
        assert!((s.min - 80.0).abs() < 1e-9);
        assert!((s.mean - 90.0).abs() < 1e-9);
        assert!(summarize(&[]).is_none());
    }
}
