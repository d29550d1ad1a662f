//! Events serialized into a session, in arrival order.

use crate::types::Sample;

/// One input to the session state machine.
///
/// Pointer events and timer ticks share one stream so they are applied in
/// the order they arrived.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Pointer pressed at a surface position.
    Down(Sample),
    /// Pointer moved while pressed.
    Move(Sample),
    /// Pointer released.
    Up(Sample),
    /// Idle timer fired.
    Tick,
    /// The input stream ended.
    Closed,
    /// The input collaborator failed.
    SourceError(String),
}
