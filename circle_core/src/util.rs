//! Timing helpers shared by the session and the ticker.

/// Number of milliseconds in one second.
pub const MILLIS_PER_SEC: u64 = 1_000;

/// Whether `ticks` idle ticks of `tick_ms` each have outlasted `delay_ms`.
#[inline]
pub fn ticks_exceed_delay(ticks: u32, tick_ms: u64, delay_ms: u64) -> bool {
    u64::from(ticks).saturating_mul(tick_ms) > delay_ms
}

/// Fewest idle ticks that trip the timeout for the given delay.
/// - Clamps `tick_ms` to at least 1 to avoid division by zero.
#[inline]
pub fn idle_tick_limit(tick_ms: u64, delay_ms: u64) -> u64 {
    delay_ms / tick_ms.max(1) + 1
}

/// Tick rate in Hz for a tick period, at least 1.
#[inline]
pub fn tick_rate_hz(tick_ms: u64) -> u64 {
    (MILLIS_PER_SEC / tick_ms.max(1)).max(1)
}
