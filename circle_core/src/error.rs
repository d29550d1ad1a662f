use thiserror::Error;

/// Game-rule violations. Every one of them ends the session; none are retried.
///
/// The `Display` text is the user-facing message shown next to the trace.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Candidate lies closer to the center than the minimum radius.
    #[error("Too small")]
    TooSmall,
    /// Local turn of the path is a near reversal, not an arc.
    #[error("Not circle")]
    NotCircle,
    /// Gap since the last accepted sample exceeded the configured delay.
    #[error("Too slow")]
    TooSlow,
    /// Pointer was released before the loop closed.
    #[error("Circle is not completed")]
    NotCompleted,
}

/// Faults that are not drawing mistakes: caller bugs, broken input
/// collaborators, or a trace rejection surfaced as an error by the runner
/// harness.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CircleError {
    #[error("invalid state: {0}")]
    State(String),
    #[error("input error: {0}")]
    Input(String),
    #[error("interrupted")]
    Interrupted,
    #[error("trace rejected: {0}")]
    Rejected(Rejection),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing center")]
    MissingCenter,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
