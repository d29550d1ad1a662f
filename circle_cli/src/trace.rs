//! Replay and simulation: config mapping, input assembly, and result output.

use crate::cli::{CliSession, LAST_SESSION};
use circle_config::{Config, TraceEventKind, TraceRow};
use circle_core::conversions::{surface_center, surface_transform};
use circle_core::error::{CircleError, Rejection, Result};
use circle_core::mocks::ScriptedSource;
use circle_core::runner::{self, RunParams};
use circle_core::{Phase, Point, Sample, SessionCfg, SessionEvent, SessionSnapshot};
use circle_traits::{AffineTransform, MonotonicClock, PointerKind, SurfaceTransform};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

pub fn rejection_name(r: Rejection) -> &'static str {
    match r {
        Rejection::TooSmall => "TooSmall",
        Rejection::NotCircle => "NotCircle",
        Rejection::TooSlow => "TooSlow",
        Rejection::NotCompleted => "NotCompleted",
    }
}

/// Session settings, surface center and device mapping derived from the config.
#[derive(Debug, Clone)]
pub struct Effective {
    pub center: Point,
    pub session: SessionCfg,
    pub transform: AffineTransform,
}

pub fn effective(cfg: &Config) -> Effective {
    let session = SessionCfg::from(&cfg.session);
    let _ = LAST_SESSION.set(CliSession {
        min_radius: session.min_radius,
        position_change_delay_ms: session.position_change_delay_ms,
        tick_interval_ms: session.tick_interval_ms,
    });
    Effective {
        center: surface_center(&cfg.surface),
        session,
        transform: surface_transform(&cfg.surface),
    }
}

fn sample_at<T: SurfaceTransform>(row: &TraceRow, idx: usize, transform: &T) -> Result<Sample> {
    match (row.x, row.y) {
        (Some(dx), Some(dy)) => {
            let (x, y) = transform.to_surface(dx, dy);
            Ok(Sample::new(x, y, row.t_ms))
        }
        _ => Err(eyre::Report::new(CircleError::Input(format!(
            "trace row {} has no coordinates",
            idx + 2
        )))),
    }
}

/// Map recorded rows to session events in surface coordinates.
pub fn events_from_rows<T: SurfaceTransform>(rows: &[TraceRow], transform: &T) -> Result<Vec<SessionEvent>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row.event {
            TraceEventKind::Tick => Ok(SessionEvent::Tick),
            TraceEventKind::Down => sample_at(row, i, transform).map(SessionEvent::Down),
            TraceEventKind::Move => sample_at(row, i, transform).map(SessionEvent::Move),
            TraceEventKind::Up => sample_at(row, i, transform).map(SessionEvent::Up),
        })
        .collect()
}

pub fn run_replay(cfg: &Config, path: &Path) -> Result<SessionSnapshot> {
    let eff = effective(cfg);
    let rows = circle_config::load_trace_csv(path)?;
    tracing::info!(rows = rows.len(), path = %path.display(), "trace loaded");
    let events = events_from_rows(&rows, &eff.transform)?;
    runner::replay(events, eff.center, eff.session)
}

/// Synthetic stroke parameters for `simulate`.
#[derive(Debug, Clone, Copy)]
pub struct SimParams {
    pub radius: f64,
    pub steps: usize,
    pub step_ms: u64,
    pub jitter: f64,
    pub stop_after: Option<usize>,
    pub seed: u32,
}

/// Surface → device, the inverse of the configured mapping.
fn to_device(t: &AffineTransform, p: Point) -> (f64, f64) {
    (p.x / t.scale + t.offset_x, p.y / t.scale + t.offset_y)
}

pub fn run_simulate(cfg: &Config, sim: SimParams, shutdown: Arc<AtomicBool>) -> Result<SessionSnapshot> {
    if !(sim.radius.is_finite() && sim.radius > 0.0) {
        eyre::bail!("--radius must be > 0");
    }
    if sim.steps < 4 {
        eyre::bail!("--steps must be >= 4");
    }
    let eff = effective(cfg);
    let points: Vec<(f64, f64)> =
        circle_core::synth::circle_points(eff.center, sim.radius, sim.steps, sim.jitter, sim.seed)
            .into_iter()
            .map(|p| to_device(&eff.transform, p))
            .collect();
    let step = Duration::from_millis(sim.step_ms);

    let mut source = ScriptedSource::new(MonotonicClock::new());
    match sim.stop_after {
        Some(n) => {
            // Hold the pointer down long enough for the idle timer to fire.
            let hold = eff.session.position_change_delay_ms.saturating_mul(2) + 100;
            source = source
                .stroke(points.iter().copied().take(n.max(1)), step)
                .then_idle(Duration::from_millis(hold));
        }
        None => {
            let (lx, ly) = points.last().copied().unwrap_or_default();
            source = source
                .stroke(points.iter().copied(), step)
                .push(step, PointerKind::Up, lx, ly);
        }
    }
    tracing::info!(
        radius = sim.radius,
        steps = sim.steps,
        step_ms = sim.step_ms,
        jitter = sim.jitter,
        events = source.remaining(),
        "simulation start"
    );

    let mut params = RunParams::new(eff.center, eff.session);
    params.shutdown = Some(shutdown);
    runner::run(source, eff.transform, params, MonotonicClock::new())
}

/// Turn a finished projection into the command result.
pub fn finish(snap: &SessionSnapshot) -> Result<()> {
    match (snap.phase, snap.rejection) {
        (_, Some(r)) => Err(eyre::Report::new(CircleError::Rejected(r))),
        (Phase::Idle, None) => Err(eyre::Report::new(CircleError::Input(
            "trace contains no pointer press".into(),
        ))),
        _ => Ok(()),
    }
}

fn status_name(snap: &SessionSnapshot) -> &'static str {
    match (snap.phase, snap.rejection) {
        (_, Some(_)) => "rejected",
        (Phase::Finished, None) => "complete",
        (Phase::Drawing, None) => "drawing",
        (Phase::Idle, None) => "idle",
    }
}

pub fn report(command: &str, snap: &SessionSnapshot, duration_ms: u64, json: bool) {
    if json {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        let obj = serde_json::json!({
            "timestamp": ts,
            "command": command,
            "status": status_name(snap),
            "accuracy": snap.aggregate_accuracy,
            "samples": snap.history.len(),
            "ideal_radius": snap.ideal_radius,
            "elapsed_ticks": snap.elapsed_ticks,
            "duration_ms": duration_ms,
            "rejection": snap.rejection.map(rejection_name),
            "error": snap.error_reason(),
        });
        println!("{obj}");
        return;
    }
    let n = snap.history.len();
    match snap.rejection {
        None if snap.is_complete() => println!(
            "Circle complete: accuracy {:.1}% over {n} samples (radius {:.1}px)",
            snap.aggregate_accuracy, snap.ideal_radius
        ),
        None => println!("No trace recorded."),
        Some(r) => println!(
            "Trace rejected: {r} (accuracy {:.1}% over {n} samples)",
            snap.aggregate_accuracy
        ),
    }
}

pub fn self_check(cfg: &Config, json: bool) {
    let eff = effective(cfg);
    let s = &eff.session;
    let idle_ticks = circle_core::util::idle_tick_limit(s.tick_interval_ms, s.position_change_delay_ms);
    if json {
        let obj = serde_json::json!({
            "status": "ok",
            "center": [eff.center.x, eff.center.y],
            "min_radius": s.min_radius,
            "position_change_delay_ms": s.position_change_delay_ms,
            "tick_interval_ms": s.tick_interval_ms,
            "tick_rate_hz": circle_core::util::tick_rate_hz(s.tick_interval_ms),
            "idle_tick_limit": idle_ticks,
            "not_circle_band": [s.not_circle_band.0, s.not_circle_band.1],
            "quadrant_boundary": format!("{:?}", s.quadrant_boundary),
        });
        println!("{obj}");
        return;
    }
    println!("OK");
    println!("  center:            ({:.1}, {:.1})", eff.center.x, eff.center.y);
    println!("  min radius:        {:.1}px", s.min_radius);
    println!(
        "  sample delay:      {}ms (timeout after {idle_ticks} idle ticks of {}ms)",
        s.position_change_delay_ms, s.tick_interval_ms
    );
    println!(
        "  not-circle band:   ({:.2}π, {:.2}π)",
        s.not_circle_band.0, s.not_circle_band.1
    );
    println!("  quadrant boundary: {:?}", s.quadrant_boundary);
}
