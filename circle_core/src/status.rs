//! Session lifecycle and per-transition status.

use crate::error::Rejection;

/// Lifecycle phase of a `CircleSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No trace yet.
    #[default]
    Idle,
    /// A trace is live and accepting samples.
    Drawing,
    /// Trace ended (closed, rejected or released); history is frozen.
    Finished,
}

/// Result of a single transition of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStatus {
    /// Keep going; the loop is not closed yet.
    Drawing,
    /// The loop closed without error.
    Complete,
    /// A game rule was broken; the session is finished.
    Rejected(Rejection),
}

impl TraceStatus {
    /// Whether the session left `Drawing` with this transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Drawing)
    }
}
