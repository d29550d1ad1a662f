use crate::builder::Set;
use crate::builder::CircleSessionBuilder;
use crate::config::SessionCfg;
use crate::error::{CircleError, Result};
use crate::event::SessionEvent;
use crate::session::{CircleSession, SessionSnapshot};
use crate::status::{Phase, TraceStatus};
use crate::ticker::Ticker;
use crate::types::{Point, Sample};
use circle_traits::clock::Clock;
use circle_traits::{PointerKind, PointerSource, SurfaceTransform};
use crossbeam_channel as xch;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Capacity of the merged pointer/tick queue.
const EVENT_QUEUE: usize = 64;
/// How often the consumer wakes to check the shutdown flag.
const SHUTDOWN_POLL: Duration = Duration::from_millis(20);

/// Parameters for a live run.
#[derive(Debug, Clone)]
pub struct RunParams {
    /// Reference center of the drawing surface.
    pub center: Point,
    pub session: SessionCfg,
    /// Optional external abort flag (e.g. Ctrl-C).
    pub shutdown: Option<Arc<AtomicBool>>,
}

impl RunParams {
    pub fn new(center: Point, session: SessionCfg) -> Self {
        Self {
            center,
            session,
            shutdown: None,
        }
    }
}

fn builder_for(center: Point, cfg: SessionCfg) -> CircleSessionBuilder<Set> {
    CircleSession::builder().with_config(cfg).with_center(center)
}

/// Apply one event to the session, skipping events that make no sense in the
/// current phase (hover moves, a second press, stale ticks).
///
/// Returns the transition status, or `None` when the event was skipped.
pub fn dispatch(session: &mut CircleSession, ev: SessionEvent) -> Result<Option<TraceStatus>> {
    let drawing = session.is_drawing();
    match ev {
        SessionEvent::Down(s) if !drawing => session.start(s).map(Some),
        SessionEvent::Down(_) => {
            tracing::warn!("second pointer press while drawing ignored");
            Ok(None)
        }
        SessionEvent::Move(s) if drawing => session.ingest(s).map(Some),
        SessionEvent::Up(s) if drawing => session.end(s).map(Some),
        SessionEvent::Tick if drawing => session.tick().map(Some),
        SessionEvent::Closed if drawing => {
            let last = session
                .last_sample()
                .unwrap_or(Sample::at(Point::default(), 0));
            tracing::debug!("input closed mid-trace; treating as release");
            session.end(last).map(Some)
        }
        SessionEvent::SourceError(msg) => Err(eyre::Report::new(CircleError::Input(msg))),
        SessionEvent::Move(_) | SessionEvent::Up(_) | SessionEvent::Tick | SessionEvent::Closed => {
            Ok(None)
        }
    }
}

/// Replay a recorded event list without threads.
///
/// Stops at the first trace that finishes. Running out of events counts as
/// the input closing.
pub fn replay<I>(events: I, center: Point, cfg: SessionCfg) -> Result<SessionSnapshot>
where
    I: IntoIterator<Item = SessionEvent>,
{
    let mut session = builder_for(center, cfg).build()?;
    let mut started = false;
    for ev in events.into_iter().chain(std::iter::once(SessionEvent::Closed)) {
        let closed = matches!(ev, SessionEvent::Closed);
        dispatch(&mut session, ev)?;
        started |= session.phase() != Phase::Idle;
        if closed || (started && session.phase() == Phase::Finished) {
            break;
        }
    }
    tracing::info!(
        phase = ?session.phase(),
        accuracy = session.aggregate_accuracy(),
        error = %session.error_reason(),
        "replay done"
    );
    Ok(session.snapshot())
}

/// Owns the pump thread for the length of a run.
///
/// Dropping joins the thread when it has already ended. A pump still blocked
/// in `PointerSource::next_event` is detached instead; it exits on its next
/// event, when the send finds the queue gone.
struct Pump(Option<std::thread::JoinHandle<()>>);

impl Drop for Pump {
    fn drop(&mut self) {
        let Some(handle) = self.0.take() else {
            return;
        };
        if !handle.is_finished() {
            tracing::debug!("pump blocked in pointer source, detaching");
            return;
        }
        if handle.join().is_err() {
            tracing::error!("pump thread panicked");
        }
    }
}

/// Forward pointer events from `source` into `tx`, mapped to surface space
/// and stamped with `clock`.
///
/// The pump exits on the next send once the consumer is gone.
fn spawn_pump<P, T, C>(
    mut source: P,
    transform: T,
    tx: xch::Sender<SessionEvent>,
    clock: C,
) -> std::thread::JoinHandle<()>
where
    P: PointerSource + Send + 'static,
    T: SurfaceTransform + Send + 'static,
    C: Clock + Send + 'static,
{
    let epoch = clock.now();
    std::thread::spawn(move || {
        loop {
            let ev = match source.next_event() {
                Ok(Some(pe)) => {
                    let (x, y) = transform.to_surface(pe.x, pe.y);
                    let s = Sample::new(x, y, clock.ms_since(epoch));
                    match pe.kind {
                        PointerKind::Down => SessionEvent::Down(s),
                        PointerKind::Move => SessionEvent::Move(s),
                        PointerKind::Up => SessionEvent::Up(s),
                    }
                }
                Ok(None) => {
                    let _ = tx.send(SessionEvent::Closed);
                    break;
                }
                Err(e) => {
                    let _ = tx.send(SessionEvent::SourceError(e.to_string()));
                    break;
                }
            };
            if tx.send(ev).is_err() {
                tracing::debug!("pump consumer disconnected, exiting thread");
                break;
            }
        }
        tracing::trace!("pump thread exiting cleanly");
    })
}

/// Run one live trace: pump pointer events from `source`, drive the idle
/// timer while drawing, and return the final projection.
///
/// Ticks and pointer events share one queue, so they are applied in arrival
/// order by this single writer. The ticker is stopped synchronously as soon
/// as the session leaves `Drawing`.
pub fn run<P, T, C>(source: P, transform: T, params: RunParams, clock: C) -> Result<SessionSnapshot>
where
    P: PointerSource + Send + 'static,
    T: SurfaceTransform + Send + 'static,
    C: Clock + Clone + Send + 'static,
{
    let mut session = builder_for(params.center, params.session).build()?;
    let tick_interval = Duration::from_millis(session.cfg().tick_interval_ms);

    let (tx, rx) = xch::bounded::<SessionEvent>(EVENT_QUEUE);
    let _pump = Pump(Some(spawn_pump(source, transform, tx.clone(), clock.clone())));
    // Handed to the ticker at draw-start; dropping it lets `rx` disconnect
    // once both producers are gone.
    let mut tick_tx = Some(tx);
    let mut ticker: Option<Ticker> = None;

    tracing::info!(
        center_x = params.center.x,
        center_y = params.center.y,
        tick_ms = session.cfg().tick_interval_ms,
        "run start"
    );

    loop {
        if let Some(flag) = &params.shutdown
            && flag.load(Ordering::Relaxed)
        {
            if let Some(mut t) = ticker.take() {
                t.stop();
            }
            tracing::warn!("run interrupted");
            return Err(eyre::Report::new(CircleError::Interrupted));
        }

        let ev = match rx.recv_timeout(SHUTDOWN_POLL) {
            Ok(ev) => ev,
            Err(xch::RecvTimeoutError::Timeout) => continue,
            Err(xch::RecvTimeoutError::Disconnected) => SessionEvent::Closed,
        };
        let closed = matches!(ev, SessionEvent::Closed);

        if let Err(e) = dispatch(&mut session, ev) {
            if let Some(mut t) = ticker.take() {
                t.stop();
            }
            return Err(e);
        }

        match session.phase() {
            Phase::Drawing => {
                if let Some(tx) = tick_tx.take() {
                    ticker = Some(Ticker::spawn(tx, tick_interval, clock.clone()));
                }
            }
            Phase::Finished => {
                if let Some(mut t) = ticker.take() {
                    t.stop();
                }
                break;
            }
            Phase::Idle if closed => break,
            Phase::Idle => {}
        }
    }

    tracing::info!(
        phase = ?session.phase(),
        samples = session.history().len(),
        accuracy = session.aggregate_accuracy(),
        error = %session.error_reason(),
        "run done"
    );
    Ok(session.snapshot())
}
