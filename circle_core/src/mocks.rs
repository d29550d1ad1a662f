//! Scripted input collaborators for simulations and tests.

use circle_traits::clock::Clock;
use circle_traits::{PointerEvent, PointerKind, PointerSource};
use std::collections::VecDeque;
use std::time::Duration;

/// Replays a fixed list of pointer events, sleeping on `clock` before each.
///
/// After the script runs out, optionally holds the stream open (as a user
/// who stops moving without lifting the pointer would) before closing it.
pub struct ScriptedSource<C: Clock> {
    script: VecDeque<(Duration, PointerEvent)>,
    idle_tail: Duration,
    clock: C,
}

impl<C: Clock> ScriptedSource<C> {
    pub fn new(clock: C) -> Self {
        Self {
            script: VecDeque::new(),
            idle_tail: Duration::ZERO,
            clock,
        }
    }

    /// Append an event delivered `after` the previous one.
    pub fn push(mut self, after: Duration, kind: PointerKind, x: f64, y: f64) -> Self {
        self.script.push_back((after, PointerEvent::new(kind, x, y)));
        self
    }

    /// Press at the first point, move through the rest, one every `step`.
    /// Does not release.
    pub fn stroke<I>(mut self, points: I, step: Duration) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        for (i, (x, y)) in points.into_iter().enumerate() {
            let kind = if i == 0 && self.script.is_empty() {
                PointerKind::Down
            } else {
                PointerKind::Move
            };
            let after = if i == 0 && self.script.is_empty() {
                Duration::ZERO
            } else {
                step
            };
            self.script.push_back((after, PointerEvent::new(kind, x, y)));
        }
        self
    }

    /// Keep the stream open for `d` after the last scripted event.
    pub fn then_idle(mut self, d: Duration) -> Self {
        self.idle_tail = d;
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl<C: Clock> PointerSource for ScriptedSource<C> {
    fn next_event(
        &mut self,
    ) -> Result<Option<PointerEvent>, Box<dyn std::error::Error + Send + Sync>> {
        match self.script.pop_front() {
            Some((after, ev)) => {
                self.clock.sleep(after);
                Ok(Some(ev))
            }
            None => {
                if !self.idle_tail.is_zero() {
                    self.clock.sleep(std::mem::take(&mut self.idle_tail));
                }
                Ok(None)
            }
        }
    }
}
