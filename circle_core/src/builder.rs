//! Type-state builder for `CircleSession`.
//!
//! The builder enforces at compile time that a center is provided before
//! `build()` is available. `try_build()` is always available for dynamic checks.

use std::marker::PhantomData;

use crate::config::SessionCfg;
use crate::error::{BuildError, Result};
use crate::geometry::QuadrantBoundary;
use crate::session::CircleSession;
use crate::types::Point;

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `CircleSession`. Configuration is validated on build.
pub struct CircleSessionBuilder<C> {
    center: Option<Point>,
    cfg: SessionCfg,
    _c: PhantomData<C>,
}

impl Default for CircleSessionBuilder<Missing> {
    fn default() -> Self {
        Self {
            center: None,
            cfg: SessionCfg::default(),
            _c: PhantomData,
        }
    }
}

impl CircleSession {
    /// Start building a session.
    pub fn builder() -> CircleSessionBuilder<Missing> {
        CircleSessionBuilder::default()
    }
}

/// Validate configuration and construct the session.
fn validate_and_build(center: Option<Point>, cfg: SessionCfg) -> Result<CircleSession> {
    let center = center.ok_or_else(|| eyre::Report::new(BuildError::MissingCenter))?;
    if !(center.x.is_finite() && center.y.is_finite()) {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "center must be finite",
        )));
    }
    cfg.validate().map_err(eyre::Report::new)?;
    tracing::debug!(
        center_x = center.x,
        center_y = center.y,
        min_radius = cfg.min_radius,
        delay_ms = cfg.position_change_delay_ms,
        "session built"
    );
    Ok(CircleSession::from_parts(center, cfg))
}

impl<C> CircleSessionBuilder<C> {
    /// Build without compile-time guarantees; fails with `BuildError::MissingCenter`.
    pub fn try_build(self) -> Result<CircleSession> {
        validate_and_build(self.center, self.cfg)
    }

    pub fn with_config(mut self, cfg: SessionCfg) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn with_min_radius(mut self, min_radius: f64) -> Self {
        self.cfg.min_radius = min_radius;
        self
    }

    pub fn with_position_change_delay_ms(mut self, ms: u64) -> Self {
        self.cfg.position_change_delay_ms = ms;
        self
    }

    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.cfg.tick_interval_ms = ms;
        self
    }

    pub fn with_quadrant_boundary(mut self, boundary: QuadrantBoundary) -> Self {
        self.cfg.quadrant_boundary = boundary;
        self
    }
}

impl CircleSessionBuilder<Missing> {
    pub fn with_center(self, center: Point) -> CircleSessionBuilder<Set> {
        CircleSessionBuilder {
            center: Some(center),
            cfg: self.cfg,
            _c: PhantomData,
        }
    }
}

impl CircleSessionBuilder<Set> {
    /// Build the session (available only once a center is set).
    pub fn build(self) -> Result<CircleSession> {
        validate_and_build(self.center, self.cfg)
    }
}
