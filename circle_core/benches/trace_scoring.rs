use circle_core::runner::replay;
use circle_core::synth::circle_points;
use circle_core::{
    Point, QuadrantBoundary, Sample, SessionCfg, SessionEvent, aggregate_accuracy, is_complete,
};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

const C: Point = Point::new(400.0, 300.0);

fn tune(g: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>) {
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p circle_core --bench trace_scoring
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(10));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }
}

pub fn bench_scoring(c: &mut Criterion) {
    let mut g = c.benchmark_group("scoring");
    tune(&mut g);

    // A long, noisy trace; far more samples than a real gesture produces.
    let pts = circle_points(C, 180.0, 20_000, 3.0, 0xC0FFEE);

    g.bench_function("aggregate_accuracy_20k", |b| {
        b.iter(|| black_box(aggregate_accuracy(black_box(pts.iter().copied()), C)));
    });

    g.bench_function("is_complete_20k", |b| {
        b.iter(|| {
            black_box(is_complete(
                black_box(pts.iter().copied()),
                C,
                QuadrantBoundary::HalfOpen,
            ))
        });
    });

    g.finish();
}

pub fn bench_replay(c: &mut Criterion) {
    let mut g = c.benchmark_group("replay");
    tune(&mut g);

    let pts = circle_points(C, 180.0, 2_000, 0.0, 1);
    let events: Vec<SessionEvent> = pts
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let s = Sample::at(p, i as u64);
            if i == 0 {
                SessionEvent::Down(s)
            } else {
                SessionEvent::Move(s)
            }
        })
        .collect();

    // Completion and accuracy are re-evaluated on every sample.
    g.bench_function("replay_2k_samples", |b| {
        b.iter_batched(
            || events.clone(),
            |ev| black_box(replay(ev, C, SessionCfg::default())),
            BatchSize::SmallInput,
        );
    });

    g.finish();
}

criterion_group!(benches, bench_scoring, bench_replay);
criterion_main!(benches);
