//! Background idle timer.
//!
//! Spawns a thread that pushes `SessionEvent::Tick` into the same channel as
//! pointer events, so ticks and samples reach the session in arrival order.
//!
//! Each `Ticker` owns exactly one thread. `stop()` (or drop) signals it and
//! joins before returning; no tick is produced after `stop()` returns. Ticks
//! already queued at that point are stale and must be ignored by a consumer
//! whose session has left `Drawing`.
use crossbeam_channel as xch;
use circle_traits::clock::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::event::SessionEvent;

pub struct Ticker {
    /// Shutdown flag for immediate response (atomic for lock-free check)
    shutdown: Arc<AtomicBool>,
    sent: Arc<AtomicU64>,
    /// Join handle for graceful thread cleanup
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<C: Clock + Send + 'static>(
        tx: xch::Sender<SessionEvent>,
        interval: Duration,
        clock: C,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let sent = Arc::new(AtomicU64::new(0));
        let sent_clone = sent.clone();
        let interval = interval.max(Duration::from_millis(1));
        tracing::debug!(
            hz = crate::util::tick_rate_hz(u64::try_from(interval.as_millis()).unwrap_or(u64::MAX)),
            "ticker start"
        );

        let join_handle = std::thread::spawn(move || {
            'run: loop {
                clock.sleep(interval);
                // Check shutdown after sleep so a stopped ticker never emits
                if shutdown_clone.load(Ordering::Acquire) {
                    break;
                }
                // Bounded send; re-check shutdown while the consumer is busy
                let mut ev = SessionEvent::Tick;
                loop {
                    match tx.send_timeout(ev, interval) {
                        Ok(()) => {
                            sent_clone.fetch_add(1, Ordering::Relaxed);
                            break;
                        }
                        Err(xch::SendTimeoutError::Timeout(back)) => {
                            if shutdown_clone.load(Ordering::Acquire) {
                                break 'run;
                            }
                            ev = back;
                        }
                        Err(xch::SendTimeoutError::Disconnected(_)) => {
                            tracing::debug!("ticker consumer disconnected, exiting thread");
                            break 'run;
                        }
                    }
                }
            }
            tracing::trace!("ticker thread exiting cleanly");
        });

        Self {
            shutdown,
            sent,
            join_handle: Some(join_handle),
        }
    }

    /// Number of ticks delivered to the channel so far.
    pub fn ticks_sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    /// False once stopped, or once the thread ended on its own.
    pub fn is_running(&self) -> bool {
        self.join_handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread and wait for it to exit. Idempotent.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!(ticks = self.ticks_sent(), "ticker thread joined");
                }
                Err(e) => {
                    // Thread panicked; log but don't propagate
                    tracing::warn!(?e, "ticker thread panicked during shutdown");
                }
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
