#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and trace parsing for the circle tracer.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Trace CSV loader enforces headers and event ordering so a recorded
//!   drawing can be replayed deterministically.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuadrantBoundary {
    /// Open arcs; a point exactly on an axis has no quadrant.
    Strict,
    /// Each axis angle belongs to exactly one arc.
    #[default]
    HalfOpen,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionToml {
    /// Samples closer than this to the center are rejected as too small.
    pub min_radius: f64,
    /// Max gap between consecutive accepted samples (ms).
    pub position_change_delay_ms: u64,
    /// Period of the idle timer (ms).
    pub tick_interval_ms: u64,
    /// Turn-angle band, as fractions of π, treated as a reversal.
    pub not_circle_band: (f64, f64),
    pub quadrant_boundary: QuadrantBoundary,
}

impl Default for SessionToml {
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

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SurfaceToml {
    /// Reference center of the drawing surface, in surface coordinates.
    pub center_x: f64,
    pub center_y: f64,
    /// device → surface: (device - offset) * scale
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for SurfaceToml {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionToml,
    #[serde(default)]
    pub surface: SurfaceToml,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Session
        let s = &self.session;
        if !(s.min_radius.is_finite() && s.min_radius > 0.0) {
            eyre::bail!("session.min_radius must be > 0");
        }
        if s.position_change_delay_ms == 0 {
            eyre::bail!("session.position_change_delay_ms must be >= 1");
        }
        if s.position_change_delay_ms > 60 * 1000 {
            eyre::bail!("session.position_change_delay_ms is unreasonably large (>60s)");
        }
        if s.tick_interval_ms == 0 {
            eyre::bail!("session.tick_interval_ms must be >= 1");
        }
        if s.tick_interval_ms > s.position_change_delay_ms {
            eyre::bail!("session.tick_interval_ms must not exceed position_change_delay_ms");
        }
        let (lo, hi) = s.not_circle_band;
        if !(lo.is_finite() && hi.is_finite()) || lo < 0.0 || hi > 2.0 || lo >= hi {
            eyre::bail!("session.not_circle_band must satisfy 0.0 <= min < max <= 2.0");
        }

        // Surface
        let f = &self.surface;
        if !(f.scale.is_finite() && f.scale > 0.0) {
            eyre::bail!("surface.scale must be > 0");
        }
        if ![f.center_x, f.center_y, f.offset_x, f.offset_y]
            .iter()
            .all(|v| v.is_finite())
        {
            eyre::bail!("surface center and offsets must be finite");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }

        Ok(())
    }
}

/// Kind of a recorded trace row.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraceEventKind {
    Down,
    Move,
    Up,
    Tick,
}

/// Trace CSV schema.
///
/// Expected headers:
/// event,x,y,t_ms
///
/// Example:
/// event,x,y,t_ms
/// down,450,300,0
/// move,449,310,10
/// tick,,,15
/// up,451,300,400
///
/// Coordinates are device coordinates; `tick` rows leave them empty.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub event: TraceEventKind,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub t_ms: u64,
}

pub fn load_trace_csv(path: &std::path::Path) -> eyre::Result<Vec<TraceRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open trace CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["event", "x", "y", "t_ms"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "trace CSV must have headers 'event,x,y,t_ms', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<TraceRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }

    validate_trace(&rows)?;
    Ok(rows)
}

/// Check that pointer rows carry coordinates and timestamps never go backwards.
pub fn validate_trace(rows: &[TraceRow]) -> eyre::Result<()> {
    let mut last_t = 0u64;
    for (i, row) in rows.iter().enumerate() {
        if row.event != TraceEventKind::Tick {
            match (row.x, row.y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {}
                _ => eyre::bail!("trace row {} ({:?}) is missing finite x/y", i + 2, row.event),
            }
        }
        if row.t_ms < last_t {
            eyre::bail!(
                "trace timestamps must be non-decreasing (row {}: {} < {})",
                i + 2,
                row.t_ms,
                last_t
            );
        }
        last_t = row.t_ms;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = load_toml("").expect("parse");
        assert_eq!(cfg.session.min_radius, 25.0);
        assert_eq!(cfg.session.position_change_delay_ms, 40);
        assert_eq!(cfg.session.tick_interval_ms, 5);
        assert_eq!(cfg.session.quadrant_boundary, QuadrantBoundary::HalfOpen);
        assert_eq!(cfg.surface.scale, 1.0);
        cfg.validate().expect("defaults are valid");
    }

    #[test]
    fn boundary_parses_kebab_case() {
        let cfg = load_toml("[session]\nquadrant_boundary = \"strict\"\n").expect("parse");
        assert_eq!(cfg.session.quadrant_boundary, QuadrantBoundary::Strict);
    }

    #[test]
    fn trace_rejects_time_going_backwards() {
        let rows = [
            TraceRow {
                event: TraceEventKind::Down,
                x: Some(1.0),
                y: Some(1.0),
                t_ms: 10,
            },
            TraceRow {
                event: TraceEventKind::Tick,
                x: None,
                y: None,
                t_ms: 5,
            },
        ];
        let err = validate_trace(&rows).expect_err("must reject");
        assert!(err.to_string().contains("non-decreasing"));
    }
}
