//! Full-revolution heuristic.
//!
//! A trace counts as a closed loop once it has touched all four quadrants and
//! its latest point is back in the quadrant it started in. This is a cheap,
//! local test rather than a winding number.

use crate::geometry::{QuadrantBoundary, quadrant_with};
use crate::types::Point;

/// Fewest points a trace needs before it can be complete.
pub const MIN_COMPLETE_LEN: usize = 3;

/// Set of quadrants (1..=4) a trace has visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadrantCoverage(u8);

impl QuadrantCoverage {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Record a quadrant; 0 (undetermined) is ignored.
    pub fn insert(&mut self, quadrant: u8) {
        if (1..=4).contains(&quadrant) {
            self.0 |= 1 << (quadrant - 1);
        }
    }

    pub fn contains(&self, quadrant: u8) -> bool {
        (1..=4).contains(&quadrant) && self.0 & (1 << (quadrant - 1)) != 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_full(&self) -> bool {
        self.0 == 0b1111
    }

    /// Visited quadrants in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=4u8).filter(|q| self.contains(*q))
    }
}

impl FromIterator<u8> for QuadrantCoverage {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut c = Self::new();
        for q in iter {
            c.insert(q);
        }
        c
    }
}

/// Whether `points` (in temporal order) close a loop around `center`.
pub fn is_complete<I>(points: I, center: Point, boundary: QuadrantBoundary) -> bool
where
    I: IntoIterator<Item = Point>,
{
    let mut len = 0usize;
    let mut first = None;
    let mut last = 0u8;
    let mut coverage = QuadrantCoverage::new();
    for p in points {
        let q = quadrant_with(p, center, boundary);
        first.get_or_insert(q);
        last = q;
        coverage.insert(q);
        len += 1;
    }
    len >= MIN_COMPLETE_LEN && coverage.is_full() && first == Some(last)
}
