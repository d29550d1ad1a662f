//! Accept/reject decision for one candidate sample.
//!
//! Rules run in a fixed order and the first match wins: too small, not a
//! circle, too slow. A candidate that passes all three is analyzed and
//! returned for appending.

use crate::config::SessionCfg;
use crate::error::Rejection;
use crate::geometry::{QuadrantBoundary, distance, turn_angle_delta};
use crate::types::{AnalyzedSample, Point, Sample};
use crate::util::ticks_exceed_delay;

/// Outcome of validating one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Accepted(AnalyzedSample),
    Rejected(Rejection),
}

/// Applies the session's shape, speed and size rules.
#[derive(Debug, Clone)]
pub struct Validator {
    min_radius: f64,
    delay_ms: u64,
    tick_ms: u64,
    band_rad: (f64, f64),
    boundary: QuadrantBoundary,
}

impl Validator {
    pub fn new(cfg: &SessionCfg) -> Self {
        Self {
            min_radius: cfg.min_radius,
            delay_ms: cfg.position_change_delay_ms,
            tick_ms: cfg.tick_interval_ms,
            band_rad: cfg.not_circle_band_rad(),
            boundary: cfg.quadrant_boundary,
        }
    }

    /// Validate `candidate` against the accepted `history`.
    pub fn check(
        &self,
        history: &[AnalyzedSample],
        center: Point,
        ideal_radius: f64,
        candidate: Sample,
    ) -> Verdict {
        if distance(candidate.point, center) < self.min_radius {
            return Verdict::Rejected(Rejection::TooSmall);
        }

        if let [.., a, b] = history {
            let delta = turn_angle_delta(a.point(), b.point(), candidate.point);
            let (lo, hi) = self.band_rad;
            if delta > lo && delta < hi {
                return Verdict::Rejected(Rejection::NotCircle);
            }
        }

        if let Some(last) = history.last()
            && candidate.timestamp_ms.saturating_sub(last.timestamp_ms()) > self.delay_ms
        {
            return Verdict::Rejected(Rejection::TooSlow);
        }

        Verdict::Accepted(AnalyzedSample::analyze(
            candidate,
            center,
            ideal_radius,
            self.boundary,
        ))
    }

    /// Tick-driven timeout: `Some(TooSlow)` once idle ticks outlast the delay.
    pub fn check_idle(&self, elapsed_ticks: u32) -> Option<Rejection> {
        ticks_exceed_delay(elapsed_ticks, self.tick_ms, self.delay_ms).then_some(Rejection::TooSlow)
    }
}
