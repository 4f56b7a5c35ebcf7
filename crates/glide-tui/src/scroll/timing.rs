//! Progress and interpolation helpers for track animations

use std::time::{Duration, Instant};

/// Fraction of `duration` elapsed since `start`, clamped to [0, 1]
#[inline]
pub fn progress(start: Instant, duration: Duration) -> f64 {
    progress_at(start, duration, Instant::now())
}

#[inline]
pub fn progress_at(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

#[inline]
pub fn is_complete(start: Instant, duration: Duration) -> bool {
    start.elapsed() >= duration
}

/// Interpolate between two track offsets
#[inline]
pub fn lerp_f32(from: f32, to: f32, t: f64) -> f32 {
    (from as f64 + (to as f64 - from as f64) * t) as f32
}
