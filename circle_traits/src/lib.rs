//! Seams between the drawing-session engine and its collaborators.
//!
//! The engine never talks to device or viewport APIs. Raw pointer input comes
//! in through `PointerSource`, device coordinates are mapped onto the drawing
//! surface by a `SurfaceTransform`, and time is read from a `Clock`.

pub mod clock;
pub mod surface;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use surface::{AffineTransform, IdentityTransform, SurfaceTransform};

/// Phase of a single pointer/touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Pointer pressed: a new trace begins here.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
}

/// A raw pointer event in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }
}

/// Blocking source of pointer events (mouse, touch, pen, or a recording).
pub trait PointerSource {
    /// Block until the next event is available.
    ///
    /// `Ok(None)` signals that the stream is closed and no more events follow.
    ///
    /// Runs on its own thread. When a run ends while this call is blocked,
    /// the thread lingers until the call returns, so device-backed sources
    /// should return within a bounded time.
    fn next_event(&mut self) -> Result<Option<PointerEvent>, Box<dyn std::error::Error + Send + Sync>>;
}

impl<P: PointerSource + ?Sized> PointerSource for Box<P> {
    fn next_event(&mut self) -> Result<Option<PointerEvent>, Box<dyn std::error::Error + Send + Sync>> {
        (**self).next_event()
    }
}
