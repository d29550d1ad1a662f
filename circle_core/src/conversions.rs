//! `From` implementations bridging `circle_config` types to `circle_core` types.

use crate::config::SessionCfg;
use crate::geometry::QuadrantBoundary;
use crate::types::Point;
use circle_traits::AffineTransform;

// ── QuadrantBoundary ─────────────────────────────────────────────────────────

impl From<circle_config::QuadrantBoundary> for QuadrantBoundary {
    fn from(b: circle_config::QuadrantBoundary) -> Self {
        match b {
            circle_config::QuadrantBoundary::Strict => Self::Strict,
            circle_config::QuadrantBoundary::HalfOpen => Self::HalfOpen,
        }
    }
}

// ── SessionCfg ───────────────────────────────────────────────────────────────

impl From<&circle_config::SessionToml> for SessionCfg {
    fn from(c: &circle_config::SessionToml) -> Self {
        Self {
            min_radius: c.min_radius,
            position_change_delay_ms: c.position_change_delay_ms,
            tick_interval_ms: c.tick_interval_ms,
            not_circle_band: c.not_circle_band,
            quadrant_boundary: c.quadrant_boundary.into(),
        }
    }
}

// ── Surface ──────────────────────────────────────────────────────────────────

/// Surface reference center from the `[surface]` table.
pub fn surface_center(c: &circle_config::SurfaceToml) -> Point {
    Point::new(c.center_x, c.center_y)
}

/// Device → surface mapping from the `[surface]` table.
pub fn surface_transform(c: &circle_config::SurfaceToml) -> AffineTransform {
    AffineTransform::new(c.scale, c.offset_x, c.offset_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_defaults_match_core_defaults() {
        let cfg = circle_config::load_toml("").expect("parse");
        assert_eq!(SessionCfg::from(&cfg.session), SessionCfg::default());
        assert_eq!(surface_center(&cfg.surface), Point::new(0.0, 0.0));
    }

    #[test]
    fn strict_boundary_maps_through() {
        let cfg = circle_config::load_toml("[session]\nquadrant_boundary = \"strict\"\n")
            .expect("parse");
        assert_eq!(
            SessionCfg::from(&cfg.session).quadrant_boundary,
            QuadrantBoundary::Strict
        );
    }
}
