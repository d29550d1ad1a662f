//! Value types flowing through the engine.

use crate::accuracy::point_accuracy;
use crate::geometry::{QuadrantBoundary, distance, quadrant_with};

/// A position on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// This point translated by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// One ingested input position with its monotonic timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub point: Point,
    pub timestamp_ms: u64,
}

impl Sample {
    pub const fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            point: Point::new(x, y),
            timestamp_ms,
        }
    }

    pub const fn at(point: Point, timestamp_ms: u64) -> Self {
        Self {
            point,
            timestamp_ms,
        }
    }
}

/// A sample that passed validation, with the attributes derived at acceptance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzedSample {
    pub sample: Sample,
    /// Fit to the ideal radius, 0..=100.
    pub accuracy: f64,
    /// 1..=4, or 0 when undetermined.
    pub quadrant: u8,
    /// Distance from the session center.
    pub radius: f64,
}

impl AnalyzedSample {
    pub fn analyze(
        sample: Sample,
        center: Point,
        ideal_radius: f64,
        boundary: QuadrantBoundary,
    ) -> Self {
        Self {
            sample,
            accuracy: point_accuracy(sample.point, center, ideal_radius),
            quadrant: quadrant_with(sample.point, center, boundary),
            radius: distance(sample.point, center),
        }
    }

    #[inline]
    pub fn point(&self) -> Point {
        self.sample.point
    }

    #[inline]
    pub fn timestamp_ms(&self) -> u64 {
        self.sample.timestamp_ms
    }
}
