//! Runtime configuration for a drawing session.
//!
//! Separate from the TOML-deserialized schema in `circle_config`; see
//! `conversions` for the mapping.

use crate::error::BuildError;
use crate::geometry::QuadrantBoundary;

/// Thresholds and conventions applied to every sample of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCfg {
    /// Samples closer than this to the center are rejected as too small.
    pub min_radius: f64,
    /// Max gap (ms) between consecutive accepted samples before "too slow".
    pub position_change_delay_ms: u64,
    /// Period (ms) of the idle timer driving tick-based timeouts.
    pub tick_interval_ms: u64,
    /// `(lo, hi)` fractions of π; a turn strictly inside `(lo·π, hi·π)` is
    /// treated as a reversal and rejected.
    pub not_circle_band: (f64, f64),
    /// Axis convention shared by sample analysis and completion.
    pub quadrant_boundary: QuadrantBoundary,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            min_radius: 25.0,
            position_change_delay_ms: 40,
            tick_interval_ms: 5,
            not_circle_band: (0.95, 1.05),
            quadrant_boundary: QuadrantBoundary::HalfOpen,
        }
    }
}

impl SessionCfg {
    pub fn validate(&self) -> Result<(), BuildError> {
        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            return Err(BuildError::InvalidConfig("min_radius must be > 0"));
        }
        if self.position_change_delay_ms == 0 {
            return Err(BuildError::InvalidConfig(
                "position_change_delay_ms must be >= 1",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(BuildError::InvalidConfig("tick_interval_ms must be >= 1"));
        }
        let (lo, hi) = self.not_circle_band;
        if !(lo.is_finite() && hi.is_finite()) || lo < 0.0 || lo >= hi {
            return Err(BuildError::InvalidConfig(
                "not_circle_band must satisfy 0 <= lo < hi",
            ));
        }
        Ok(())
    }

    /// Band bounds in radians.
    #[inline]
    pub fn not_circle_band_rad(&self) -> (f64, f64) {
        let (lo, hi) = self.not_circle_band;
        (lo * std::f64::consts::PI, hi * std::f64::consts::PI)
    }
}
