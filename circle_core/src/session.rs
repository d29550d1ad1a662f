//! The drawing-session state machine (`CircleSession`).
//!
//! Owns the lifecycle (Idle → Drawing → Finished, re-enterable via `start`),
//! the accepted-sample history, the fixed center and the ideal radius. Each
//! transition returns a `TraceStatus`; game-rule violations come back as
//! `TraceStatus::Rejected`, while calls made in the wrong phase are caller
//! bugs and come back as `Err(CircleError::State)`.

use crate::accuracy::{AccuracySummary, history_accuracy, summarize};
use crate::completion::{QuadrantCoverage, is_complete};
use crate::config::SessionCfg;
use crate::error::{CircleError, Rejection, Result};
use crate::geometry::distance;
use crate::status::{Phase, TraceStatus};
use crate::types::{AnalyzedSample, Point, Sample};
use crate::validator::{Validator, Verdict};

/// One attempt at drawing a circle, from draw-start to termination.
pub struct CircleSession {
    pub(crate) cfg: SessionCfg,
    pub(crate) validator: Validator,
    /// Reference point of the drawing surface; becomes the session center on start.
    pub(crate) surface_center: Point,
    pub(crate) center: Option<Point>,
    pub(crate) phase: Phase,
    pub(crate) ideal_radius: f64,
    pub(crate) history: Vec<AnalyzedSample>,
    pub(crate) rejection: Option<Rejection>,
    pub(crate) elapsed_ticks: u32,
    // Recomputed on every append.
    pub(crate) aggregate: f64,
}

impl core::fmt::Debug for CircleSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CircleSession")
            .field("phase", &self.phase)
            .field("ideal_radius", &self.ideal_radius)
            .field("samples", &self.history.len())
            .field("rejection", &self.rejection)
            .finish()
    }
}

/// Owned read-only projection of a session, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub center: Option<Point>,
    pub ideal_radius: f64,
    pub history: Vec<AnalyzedSample>,
    pub aggregate_accuracy: f64,
    pub rejection: Option<Rejection>,
    pub elapsed_ticks: u32,
}

impl SessionSnapshot {
    /// User-facing error text, empty when there is none.
    pub fn error_reason(&self) -> String {
        self.rejection.map(|r| r.to_string()).unwrap_or_default()
    }

    /// Whether the trace ended as a closed loop with no error.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Finished && self.rejection.is_none()
    }
}

impl CircleSession {
    pub(crate) fn from_parts(surface_center: Point, cfg: SessionCfg) -> Self {
        Self {
            validator: Validator::new(&cfg),
            cfg,
            surface_center,
            center: None,
            phase: Phase::Idle,
            ideal_radius: 0.0,
            history: Vec::new(),
            rejection: None,
            elapsed_ticks: 0,
            aggregate: 0.0,
        }
    }

    fn contract(&self, op: &str) -> eyre::Report {
        eyre::Report::new(CircleError::State(format!(
            "{op} called while {:?}",
            self.phase
        )))
    }

    /// Non-finite coordinates are a caller fault, never a drawing mistake.
    fn finite(op: &str, sample: &Sample) -> Result<()> {
        if sample.point.is_finite() {
            return Ok(());
        }
        Err(eyre::Report::new(CircleError::Input(format!(
            "{op} sample has non-finite coordinates ({}, {})",
            sample.point.x, sample.point.y
        ))))
    }

    /// Begin a new trace at `first`. Valid from `Idle` or `Finished`.
    ///
    /// Fixes the center and the ideal radius, clears all per-trace state, then
    /// validates `first` like any other sample.
    pub fn start(&mut self, first: Sample) -> Result<TraceStatus> {
        if self.phase == Phase::Drawing {
            return Err(self.contract("start"));
        }
        Self::finite("start", &first)?;
        let center = self.surface_center;
        self.history.clear();
        self.rejection = None;
        self.elapsed_ticks = 0;
        self.aggregate = 0.0;
        self.ideal_radius = distance(first.point, center);
        self.center = Some(center);
        self.phase = Phase::Drawing;
        tracing::info!(
            x = first.point.x,
            y = first.point.y,
            ideal_radius = self.ideal_radius,
            "trace start"
        );
        Ok(self.apply(first))
    }

    /// Offer the next sample. Valid only while `Drawing`.
    ///
    /// Completion is evaluated first over history plus the candidate; a
    /// closing candidate finishes the session and is not appended.
    pub fn ingest(&mut self, sample: Sample) -> Result<TraceStatus> {
        if self.phase != Phase::Drawing {
            return Err(self.contract("ingest"));
        }
        Self::finite("ingest", &sample)?;
        let center = self.center_or_surface();
        let closes = self.history.len() >= crate::completion::MIN_COMPLETE_LEN
            && is_complete(
                self.history
                    .iter()
                    .map(AnalyzedSample::point)
                    .chain(std::iter::once(sample.point)),
                center,
                self.cfg.quadrant_boundary,
            );
        if closes {
            self.phase = Phase::Finished;
            tracing::info!(
                samples = self.history.len(),
                accuracy = self.aggregate,
                "trace complete"
            );
            return Ok(TraceStatus::Complete);
        }
        Ok(self.apply(sample))
    }

    /// Pointer released. Valid only while `Drawing`; always finishes.
    pub fn end(&mut self, final_sample: Sample) -> Result<TraceStatus> {
        if self.phase != Phase::Drawing {
            return Err(self.contract("end"));
        }
        Self::finite("end", &final_sample)?;
        let closed = is_complete(
            self.history.iter().map(AnalyzedSample::point),
            self.center_or_surface(),
            self.cfg.quadrant_boundary,
        );
        tracing::debug!(
            x = final_sample.point.x,
            y = final_sample.point.y,
            closed,
            "trace released"
        );
        if closed {
            self.phase = Phase::Finished;
            Ok(TraceStatus::Complete)
        } else {
            Ok(self.reject(Rejection::NotCompleted))
        }
    }

    /// One period of the idle timer. Valid only while `Drawing`.
    pub fn tick(&mut self) -> Result<TraceStatus> {
        if self.phase != Phase::Drawing {
            return Err(self.contract("tick"));
        }
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
        match self.validator.check_idle(self.elapsed_ticks) {
            Some(r) => Ok(self.reject(r)),
            None => Ok(TraceStatus::Drawing),
        }
    }

    fn apply(&mut self, sample: Sample) -> TraceStatus {
        let center = self.center_or_surface();
        match self
            .validator
            .check(&self.history, center, self.ideal_radius, sample)
        {
            Verdict::Accepted(a) => {
                tracing::debug!(
                    x = a.sample.point.x,
                    y = a.sample.point.y,
                    accuracy = a.accuracy,
                    quadrant = a.quadrant,
                    "sample accepted"
                );
                self.history.push(a);
                self.elapsed_ticks = 0;
                self.aggregate = history_accuracy(&self.history, center);
                TraceStatus::Drawing
            }
            Verdict::Rejected(r) => self.reject(r),
        }
    }

    fn reject(&mut self, r: Rejection) -> TraceStatus {
        self.phase = Phase::Finished;
        self.rejection = Some(r);
        tracing::warn!(reason = %r, samples = self.history.len(), "trace rejected");
        TraceStatus::Rejected(r)
    }

    #[inline]
    fn center_or_surface(&self) -> Point {
        self.center.unwrap_or(self.surface_center)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_drawing(&self) -> bool {
        self.phase == Phase::Drawing
    }

    /// Session center; `None` until the first `start`.
    pub fn center(&self) -> Option<Point> {
        self.center
    }

    pub fn ideal_radius(&self) -> f64 {
        self.ideal_radius
    }

    /// Accepted samples in temporal order.
    pub fn history(&self) -> &[AnalyzedSample] {
        &self.history
    }

    pub fn last_sample(&self) -> Option<Sample> {
        self.history.last().map(|a| a.sample)
    }

    /// Roundness of the accepted trace, 0..=100.
    pub fn aggregate_accuracy(&self) -> f64 {
        self.aggregate
    }

    pub fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }

    /// User-facing error text, empty when there is none.
    pub fn error_reason(&self) -> String {
        self.rejection.map(|r| r.to_string()).unwrap_or_default()
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn cfg(&self) -> &SessionCfg {
        &self.cfg
    }

    /// Quadrants visited by the accepted trace.
    pub fn coverage(&self) -> QuadrantCoverage {
        self.history.iter().map(|a| a.quadrant).collect()
    }

    pub fn summary(&self) -> Option<AccuracySummary> {
        summarize(&self.history)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            center: self.center,
            ideal_radius: self.ideal_radius,
            history: self.history.clone(),
            aggregate_accuracy: self.aggregate,
            rejection: self.rejection,
            elapsed_ticks: self.elapsed_ticks,
        }
    }
}
