//! Synthetic traces: hand-drawn-ish circles for simulation and benches.

use crate::types::{Point, Sample};
use std::f64::consts::TAU;

/// Tiny xorshift PRNG; deterministic per seed.
#[derive(Debug, Clone)]
pub struct XorShift(u32);

impl XorShift {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        f64::from(x) / (f64::from(u32::MAX) + 1.0)
    }
}

/// `steps + 1` points sweeping one full turn around `center`, starting on the
/// positive x axis. Each radius is perturbed by up to `±jitter`.
pub fn circle_points(center: Point, radius: f64, steps: usize, jitter: f64, seed: u32) -> Vec<Point> {
    let steps = steps.max(1);
    let mut rng = XorShift::new(seed);
    (0..=steps)
        .map(|k| {
            let theta = TAU * k as f64 / steps as f64;
            let r = if jitter > 0.0 {
                radius + (rng.next_f64() * 2.0 - 1.0) * jitter
            } else {
                radius
            };
            center.offset(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

/// Noise-free circle samples `step_ms` apart, starting at `t0_ms`.
pub fn circle_samples(center: Point, radius: f64, steps: usize, step_ms: u64, t0_ms: u64) -> Vec<Sample> {
    circle_points(center, radius, steps, 0.0, 0)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Sample::at(p, t0_ms + step_ms * i as u64))
        .collect()
}
