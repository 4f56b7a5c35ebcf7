use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::CarouselConfig;
use crate::timer::{RepeatingTimer, DEFAULT_INTERVAL};
use crate::{Error, Result};

use super::indicator::IndicatorSet;
use super::view::CarouselView;

/// Behaviour switches for a carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    /// Start auto-advancing right after construction
    pub autoplay: bool,
    pub interval: Duration,
    /// Suspend auto-advance while the pointer is over the carousel
    pub pause_on_hover: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval: DEFAULT_INTERVAL,
            pause_on_hover: true,
        }
    }
}

impl From<&CarouselConfig> for CarouselOptions {
    fn from(config: &CarouselConfig) -> Self {
        Self {
            autoplay: config.autoplay,
            interval: Duration::from_millis(config.interval_ms),
            pause_on_hover: config.pause_on_hover,
        }
    }
}

/// Events a host forwards to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    PrevClick,
    NextClick,
    IndicatorClick(usize),
    HoverEnter,
    HoverLeave,
    /// Periodic wake-up; fires the auto-advance timer when due
    Tick,
}

/// Point-in-time view of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselSnapshot {
    pub cursor: usize,
    pub slide_count: usize,
    pub autoplay: bool,
    pub timer_active: bool,
    pub hovered: bool,
}

/// Cyclic slide selector with timed auto-advance.
///
/// The cursor is always a valid slide index. Every navigation, manual or
/// automatic, re-arms the auto-advance timer, including navigation to the
/// slide that is already showing. While the pointer hovers a carousel that
/// pauses on hover, navigation moves the cursor but leaves the timer stopped
/// until the pointer leaves.
#[derive(Debug)]
pub struct CarouselController<V: CarouselView> {
    view: V,
    clock: Arc<dyn Clock>,
    slide_count: usize,
    cursor: usize,
    indicators: IndicatorSet,
    timer: RepeatingTimer,
    /// Whether auto-advance is wanted; hover pauses the timer without clearing it
    autoplay: bool,
    pause_on_hover: bool,
    hovered: bool,
}

impl<V: CarouselView> CarouselController<V> {
    /// Wire a carousel over `slide_count` slides.
    ///
    /// Fails with [`Error::EmptyCarousel`] when there is nothing to show, in
    /// which case no indicator is built and no timer is started.
    pub fn new(
        slide_count: usize,
        mut view: V,
        clock: Arc<dyn Clock>,
        options: CarouselOptions,
    ) -> Result<Self> {
        if slide_count == 0 {
            return Err(Error::EmptyCarousel);
        }

        let indicators = IndicatorSet::new(slide_count);
        view.build_indicators(&indicators.labels());
        view.set_slide_active(0, true);
        view.set_indicator_active(0, true);

        let mut controller = Self {
            view,
            clock,
            slide_count,
            cursor: 0,
            indicators,
            timer: RepeatingTimer::new(options.interval),
            autoplay: false,
            pause_on_hover: options.pause_on_hover,
            hovered: false,
        };

        if options.autoplay {
            controller.start_autoplay(options.interval);
        }

        debug!(
            "Carousel wired: {} slides, autoplay={}",
            slide_count, options.autoplay
        );
        Ok(controller)
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// True while an auto-advance is scheduled
    #[inline]
    pub fn is_timer_active(&self) -> bool {
        self.timer.is_active()
    }

    #[inline]
    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    /// Next auto-advance deadline, for hosts that sleep until it
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Time left before the next auto-advance
    pub fn time_until_advance(&self) -> Option<Duration> {
        self.timer.remaining(self.clock.now())
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            cursor: self.cursor,
            slide_count: self.slide_count,
            autoplay: self.autoplay,
            timer_active: self.timer.is_active(),
            hovered: self.hovered,
        }
    }

    /// Show slide `index` and restart the auto-advance window
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        if index >= self.slide_count {
            warn!(
                "Rejected carousel navigation to {} ({} slides)",
                index, self.slide_count
            );
            return Err(Error::SlideOutOfRange {
                index,
                count: self.slide_count,
            });
        }
        let now = self.clock.now();
        self.show(index, now);
        Ok(())
    }

    pub fn next(&mut self) {
        let now = self.clock.now();
        self.show(self.next_index(), now);
    }

    pub fn previous(&mut self) {
        let now = self.clock.now();
        let prev = (self.cursor + self.slide_count - 1) % self.slide_count;
        self.show(prev, now);
    }

    /// Begin auto-advancing every `interval`, replacing any running timer
    pub fn start_autoplay(&mut self, interval: Duration) {
        self.autoplay = true;
        self.timer.arm_with(interval, self.clock.now());
        if self.is_paused_by_hover() {
            self.timer.cancel();
        }
        info!("Carousel autoplay started ({}ms)", self.timer.interval().as_millis());
    }

    /// Stop auto-advancing. Safe to call when already stopped.
    pub fn stop_autoplay(&mut self) {
        if self.autoplay || self.timer.is_active() {
            info!("Carousel autoplay stopped");
        }
        self.autoplay = false;
        self.timer.cancel();
    }

    pub fn toggle_autoplay(&mut self) {
        if self.autoplay {
            self.stop_autoplay();
        } else {
            self.start_autoplay(self.timer.interval());
        }
    }

    pub fn on_prev_click(&mut self) {
        self.previous();
    }

    pub fn on_next_click(&mut self) {
        self.next();
    }

    pub fn on_indicator_click(&mut self, index: usize) -> Result<()> {
        self.go_to(index)
    }

    pub fn on_hover_enter(&mut self) {
        if self.hovered {
            return;
        }
        self.hovered = true;
        if self.pause_on_hover {
            debug!("Carousel hovered, pausing autoplay");
            self.timer.cancel();
        }
    }

    pub fn on_hover_leave(&mut self) {
        if !self.hovered {
            return;
        }
        self.hovered = false;
        if self.pause_on_hover && self.autoplay {
            debug!("Carousel left, resuming autoplay");
            self.timer.arm(self.clock.now());
        }
    }

    /// Fire the auto-advance timer if it is due.
    ///
    /// A late tick catches up on every missed interval: each fire re-arms from
    /// its own deadline, so `k` missed fires advance the cursor by `k`.
    /// Returns the number of fires handled.
    pub fn on_tick(&mut self) -> u64 {
        let now = self.clock.now();
        let Some(first) = self.timer.due(now) else {
            return 0;
        };

        let interval = self.timer.interval();
        let late = now.saturating_duration_since(first);
        let fires = 1 + (late.as_nanos() / interval.as_nanos()) as u64;
        let last_fire = first + nanos(interval.as_nanos() * u128::from(fires - 1));

        let steps = (fires % self.slide_count as u64) as usize;
        let target = (self.cursor + steps) % self.slide_count;
        debug!("Carousel auto-advance: {} fire(s), {} -> {}", fires, self.cursor, target);
        self.show(target, last_fire);
        fires
    }

    pub fn handle(&mut self, event: CarouselEvent) -> Result<()> {
        match event {
            CarouselEvent::PrevClick => self.on_prev_click(),
            CarouselEvent::NextClick => self.on_next_click(),
            CarouselEvent::IndicatorClick(index) => self.on_indicator_click(index)?,
            CarouselEvent::HoverEnter => self.on_hover_enter(),
            CarouselEvent::HoverLeave => self.on_hover_leave(),
            CarouselEvent::Tick => {
                self.on_tick();
            }
        }
        Ok(())
    }

    fn next_index(&self) -> usize {
        (self.cursor + 1) % self.slide_count
    }

    /// Move the cursor and re-arm the timer from `at`. `index` must be valid.
    fn show(&mut self, index: usize, at: Instant) {
        self.view.set_slide_active(self.cursor, false);
        self.view.set_indicator_active(self.cursor, false);

        self.cursor = index;
        self.indicators.activate(index);

        self.view.set_slide_active(index, true);
        self.view.set_indicator_active(index, true);

        self.timer.cancel();
        if self.autoplay && !self.is_paused_by_hover() {
            self.timer.arm(at);
        }
    }

    fn is_paused_by_hover(&self) -> bool {
        self.hovered && self.pause_on_hover
    }
}

fn nanos(n: u128) -> Duration {
    Duration::from_nanos(u64::try_from(n).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::NullView;
    use crate::clock::ManualClock;

    /// Mirrors the active flags a DOM host would keep
    #[derive(Debug, Default)]
    struct FlagView {
        slides: Vec<bool>,
        dots: Vec<bool>,
        labels: Vec<String>,
    }

    impl CarouselView for FlagView {
        fn build_indicators(&mut self, labels: &[String]) {
            self.labels = labels.to_vec();
            self.slides = vec![false; labels.len()];
            self.dots = vec![false; labels.len()];
        }

        fn set_slide_active(&mut self, index: usize, active: bool) {
            self.slides[index] = active;
        }

        fn set_indicator_active(&mut self, index: usize, active: bool) {
            self.dots[index] = active;
        }
    }

    fn carousel(count: usize) -> (CarouselController<FlagView>, ManualClock) {
        let clock = ManualClock::new();
        let controller = CarouselController::new(
            count,
            FlagView::default(),
            Arc::new(clock.clone()),
            CarouselOptions::default(),
        )
        .unwrap();
        (controller, clock)
    }

    fn assert_single_active(c: &CarouselController<FlagView>) {
        assert_eq!(c.indicators().active_count(), 1);
        assert_eq!(c.indicators().active_index(), Some(c.cursor()));
        assert_eq!(active(&c.view().dots), vec![c.cursor()]);
        assert_eq!(active(&c.view().slides), vec![c.cursor()]);
    }

    fn active(flags: &[bool]) -> Vec<usize> {
        flags
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_empty_carousel_is_rejected() {
        let result = CarouselController::new(
            0,
            NullView,
            Arc::new(ManualClock::new()),
            CarouselOptions::default(),
        );
        assert!(matches!(result, Err(Error::EmptyCarousel)));
    }

    #[test]
    fn test_construction_builds_indicators() {
        let (c, _) = carousel(3);
        assert_eq!(c.view().labels, vec!["Go to slide 1", "Go to slide 2", "Go to slide 3"]);
        assert_eq!(c.cursor(), 0);
        assert!(c.is_timer_active());
        assert_single_active(&c);
    }

    #[test]
    fn test_cursor_stays_in_range() {
        for count in 1..=6 {
            let (mut c, _) = carousel(count);
            for step in 0..40 {
                if step % 3 == 0 {
                    c.previous();
                } else {
                    c.next();
                }
                assert!(c.cursor() < count);
                assert_single_active(&c);
            }
        }
    }

    #[test]
    fn test_next_and_previous_are_inverse() {
        for count in 2..=5 {
            for start in 0..count {
                let (mut c, _) = carousel(count);
                c.go_to(start).unwrap();

                c.next();
                c.previous();
                assert_eq!(c.cursor(), start);

                c.previous();
                c.next();
                assert_eq!(c.cursor(), start);
            }
        }
    }

    #[test]
    fn test_wraps_at_both_ends() {
        let (mut c, _) = carousel(3);
        c.previous();
        assert_eq!(c.cursor(), 2);
        c.next();
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_go_to_sets_cursor() {
        let (mut c, _) = carousel(5);
        for k in [4, 0, 2, 2, 3] {
            c.go_to(k).unwrap();
            assert_eq!(c.cursor(), k);
            assert_single_active(&c);
        }
    }

    #[test]
    fn test_go_to_out_of_range_changes_nothing() {
        let (mut c, _) = carousel(3);
        c.go_to(1).unwrap();
        let err = c.go_to(3).unwrap_err();
        assert!(matches!(err, Error::SlideOutOfRange { index: 3, count: 3 }));
        assert_eq!(c.cursor(), 1);
        assert_single_active(&c);
    }

    #[test]
    fn test_autoplay_advances_every_interval() {
        let (mut c, clock) = carousel(4);

        for expected in [1, 2, 3] {
            clock.advance(Duration::from_millis(3999));
            assert_eq!(c.on_tick(), 0);
            clock.advance(Duration::from_millis(1));
            assert_eq!(c.on_tick(), 1);
            assert_eq!(c.cursor(), expected);
        }
    }

    #[test]
    fn test_late_tick_catches_up() {
        let (mut c, clock) = carousel(4);
        clock.advance(Duration::from_millis(12_000));

        assert_eq!(c.on_tick(), 3);
        assert_eq!(c.cursor(), 3);
        assert_single_active(&c);

        // Next fire stays on the original 4s grid
        clock.advance(Duration::from_millis(4_000));
        assert_eq!(c.on_tick(), 1);
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_stop_autoplay_prevents_advance() {
        let (mut c, clock) = carousel(4);
        c.stop_autoplay();
        c.stop_autoplay();

        clock.advance(Duration::from_secs(3600));
        assert_eq!(c.on_tick(), 0);
        assert_eq!(c.cursor(), 0);
        assert!(!c.is_timer_active());
    }

    #[test]
    fn test_manual_navigation_resets_window() {
        let (mut c, clock) = carousel(4);
        clock.advance(Duration::from_millis(3000));
        c.go_to(0).unwrap();

        clock.advance(Duration::from_millis(3000));
        assert_eq!(c.on_tick(), 0);
        assert_eq!(c.cursor(), 0);

        clock.advance(Duration::from_millis(1000));
        assert_eq!(c.on_tick(), 1);
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_single_slide_navigation_still_resets_timer() {
        let (mut c, clock) = carousel(1);
        clock.advance(Duration::from_millis(3000));
        c.next();
        assert_eq!(c.cursor(), 0);
        assert_eq!(c.time_until_advance(), Some(Duration::from_millis(4000)));

        c.previous();
        assert_eq!(c.cursor(), 0);
        assert_single_active(&c);
    }

    #[test]
    fn test_restart_does_not_stack_timers() {
        let (mut c, clock) = carousel(4);
        c.start_autoplay(Duration::from_millis(4000));
        clock.advance(Duration::from_millis(2000));
        c.start_autoplay(Duration::from_millis(4000));

        clock.advance(Duration::from_millis(2000));
        assert_eq!(c.on_tick(), 0);
        clock.advance(Duration::from_millis(2000));
        assert_eq!(c.on_tick(), 1);
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_hover_pauses_and_resumes() {
        let (mut c, clock) = carousel(4);
        c.handle(CarouselEvent::HoverEnter).unwrap();
        assert!(!c.is_timer_active());

        clock.advance(Duration::from_millis(10_000));
        c.handle(CarouselEvent::Tick).unwrap();
        assert_eq!(c.cursor(), 0);

        c.handle(CarouselEvent::HoverLeave).unwrap();
        assert!(c.is_timer_active());
        clock.advance(Duration::from_millis(4000));
        assert_eq!(c.on_tick(), 1);
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_navigation_while_hovered_stays_paused() {
        let (mut c, clock) = carousel(4);
        c.on_hover_enter();

        c.on_next_click();
        c.go_to(3).unwrap();
        c.start_autoplay(Duration::from_millis(1000));
        assert_eq!(c.cursor(), 3);
        assert!(!c.is_timer_active());

        clock.advance(Duration::from_millis(8000));
        assert_eq!(c.on_tick(), 0);
        assert_eq!(c.cursor(), 3);

        c.on_hover_leave();
        assert_eq!(c.time_until_advance(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn test_hover_leave_respects_stopped_autoplay() {
        let (mut c, _) = carousel(4);
        c.stop_autoplay();
        c.on_hover_enter();
        c.on_hover_leave();
        assert!(!c.is_timer_active());
    }

    #[test]
    fn test_hover_without_pause_policy_keeps_timer() {
        let clock = ManualClock::new();
        let options = CarouselOptions {
            pause_on_hover: false,
            ..Default::default()
        };
        let mut c =
            CarouselController::new(3, NullView, Arc::new(clock.clone()), options).unwrap();
        c.on_hover_enter();
        clock.advance(Duration::from_millis(4000));
        assert_eq!(c.on_tick(), 1);
    }

    #[test]
    fn test_event_dispatch() {
        let (mut c, _) = carousel(4);
        c.handle(CarouselEvent::NextClick).unwrap();
        c.handle(CarouselEvent::NextClick).unwrap();
        c.handle(CarouselEvent::PrevClick).unwrap();
        assert_eq!(c.cursor(), 1);

        c.handle(CarouselEvent::IndicatorClick(3)).unwrap();
        assert_eq!(c.cursor(), 3);
        assert!(c.handle(CarouselEvent::IndicatorClick(4)).is_err());
    }

    #[test]
    fn test_toggle_autoplay() {
        let (mut c, _) = carousel(2);
        c.toggle_autoplay();
        assert!(!c.is_autoplay());
        assert!(!c.is_timer_active());
        c.toggle_autoplay();
        assert!(c.is_autoplay());
        assert!(c.is_timer_active());
    }

    #[test]
    fn test_snapshot() {
        let (mut c, _) = carousel(3);
        c.go_to(2).unwrap();
        c.on_hover_enter();
        assert_eq!(
            c.snapshot(),
            CarouselSnapshot {
                cursor: 2,
                slide_count: 3,
                autoplay: true,
                timer_active: false,
                hovered: true,
            }
        );
    }
}
