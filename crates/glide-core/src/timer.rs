//! Recurring deadline timer used for auto-advance

use std::time::{Duration, Instant};

/// Default auto-advance interval
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(4000);

/// A single recurring timer.
///
/// There is exactly one deadline slot, so arming always replaces the previous
/// schedule and two timers can never overlap.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Default for RepeatingTimer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl RepeatingTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: clamp_interval(interval),
            deadline: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel any pending fire and schedule the next one `interval` after `from`
    pub fn arm(&mut self, from: Instant) {
        self.deadline = Some(from + self.interval);
    }

    /// Change the interval and re-arm
    pub fn arm_with(&mut self, interval: Duration, from: Instant) {
        self.interval = clamp_interval(interval);
        self.arm(from);
    }

    /// Cancel the pending fire. No-op when already idle.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Deadline that has passed at `now`, if any.
    ///
    /// Does not re-arm: the caller decides what the next schedule is.
    pub fn due(&self, now: Instant) -> Option<Instant> {
        self.deadline.filter(|deadline| *deadline <= now)
    }

    /// Time left until the next fire
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

// A zero interval would fire forever within a single catch-up.
fn clamp_interval(interval: Duration) -> Duration {
    interval.max(Duration::from_millis(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_replaces_previous_deadline() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(Duration::from_millis(100));

        timer.arm(start);
        timer.arm(start + Duration::from_millis(50));

        assert_eq!(timer.deadline(), Some(start + Duration::from_millis(150)));
    }

    #[test]
    fn test_due_only_after_deadline() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(Duration::from_millis(100));
        timer.arm(start);

        assert!(timer.due(start + Duration::from_millis(99)).is_none());
        assert_eq!(
            timer.due(start + Duration::from_millis(100)),
            Some(start + Duration::from_millis(100))
        );
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timer = RepeatingTimer::default();
        timer.cancel();
        timer.arm(Instant::now());
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_active());
        assert!(timer.remaining(Instant::now()).is_none());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let timer = RepeatingTimer::new(Duration::ZERO);
        assert_eq!(timer.interval(), Duration::from_millis(1));
    }
}
