//! Trailing-edge debounce for bursty host events such as resizes

use std::time::{Duration, Instant};

/// Holds the latest value until `wait` has passed without a newer one
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    wait: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Replace the pending value and restart the quiet period
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.wait));
    }

    /// Take the value once the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, ready_at)) if ready_at <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without emitting it
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
