#![no_main]
use circle_core::runner::replay;
use circle_core::{Phase, Point, Sample, SessionCfg, SessionEvent};
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Down(i16, i16, u8),
    Move(i16, i16, u8),
    Up(i16, i16, u8),
    Tick,
}

fuzz_target!(|ops: Vec<Op>| {
    // Timestamps advance by the per-op delta so they never go backwards.
    let mut t = 0u64;
    let mut sample = |x: i16, y: i16, dt: u8| {
        t += u64::from(dt);
        Sample::new(f64::from(x), f64::from(y), t)
    };
    let events: Vec<SessionEvent> = ops
        .into_iter()
        .map(|op| match op {
            Op::Down(x, y, dt) => SessionEvent::Down(sample(x, y, dt)),
            Op::Move(x, y, dt) => SessionEvent::Move(sample(x, y, dt)),
            Op::Up(x, y, dt) => SessionEvent::Up(sample(x, y, dt)),
            Op::Tick => SessionEvent::Tick,
        })
        .collect();

    let snap = replay(events, Point::new(0.0, 0.0), SessionCfg::default()).unwrap();
    assert!((0.0..=100.0).contains(&snap.aggregate_accuracy));
    if snap.phase == Phase::Finished && snap.rejection.is_none() {
        assert!(snap.history.len() >= 3);
    }
    for a in &snap.history {
        assert!((0.0..=100.0).contains(&a.accuracy));
    }
});
