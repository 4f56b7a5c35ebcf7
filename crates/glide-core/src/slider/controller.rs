use serde::Serialize;
use tracing::debug;

use crate::config::SliderConfig;

use super::view::{ControlStyle, SliderControl, SliderView};

/// Scroll distance of one card plus its gap
pub const DEFAULT_STEP: f32 = 320.0;
/// Slack used when deciding that the track reached its end
pub const DEFAULT_EDGE_TOLERANCE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderOptions {
    pub step: f32,
    pub edge_tolerance: f32,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            edge_tolerance: DEFAULT_EDGE_TOLERANCE,
        }
    }
}

impl From<&SliderConfig> for SliderOptions {
    fn from(config: &SliderConfig) -> Self {
        Self {
            step: config.step,
            edge_tolerance: config.edge_tolerance,
        }
    }
}

/// Horizontal arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
}

/// Whether the track sits at either extreme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Boundary {
    pub at_start: bool,
    pub at_end: bool,
}

/// Scroll track with clamped offset and edge-aware controls.
///
/// `offset` is always within `[0, max_offset]`. The previous control is
/// disabled at the start, the next control within `edge_tolerance` of the end.
#[derive(Debug)]
pub struct ScrollSlider<V: SliderView> {
    view: V,
    offset: f32,
    max_offset: f32,
    content_width: f32,
    viewport_width: f32,
    step: f32,
    edge_tolerance: f32,
    boundary: Boundary,
}

impl<V: SliderView> ScrollSlider<V> {
    pub fn new(content_width: f32, viewport_width: f32, view: V, options: SliderOptions) -> Self {
        let mut slider = Self {
            view,
            offset: 0.0,
            max_offset: 0.0,
            content_width: 0.0,
            viewport_width: 0.0,
            step: sanitize(options.step).abs(),
            edge_tolerance: sanitize(options.edge_tolerance).abs(),
            boundary: Boundary::default(),
        };
        slider.set_extent(content_width, viewport_width);
        slider.refresh_controls();
        slider
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    #[inline]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn is_enabled(&self, control: SliderControl) -> bool {
        match control {
            SliderControl::Prev => !self.boundary.at_start,
            SliderControl::Next => !self.boundary.at_end,
        }
    }

    pub fn control_style(&self, control: SliderControl) -> ControlStyle {
        ControlStyle::for_enabled(self.is_enabled(control))
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Move the track by `delta`, clamped to the scrollable range
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let target = (self.offset + sanitize(delta)).clamp(0.0, self.max_offset);
        if target != self.offset {
            debug!("Slider scroll {:.1} -> {:.1}", self.offset, target);
            self.offset = target;
            self.view.scroll_to(target);
        }
        self.refresh_controls();
        self.offset
    }

    /// Host reports the track's current offset (user scrolled it directly)
    pub fn on_scroll(&mut self, offset: f32) {
        self.offset = sanitize(offset).clamp(0.0, self.max_offset);
        self.refresh_controls();
    }

    /// Content or viewport size changed
    pub fn on_resize(&mut self, content_width: f32, viewport_width: f32) {
        let before = self.offset;
        self.set_extent(content_width, viewport_width);
        if self.offset != before {
            self.view.scroll_to(self.offset);
        }
        self.refresh_controls();
    }

    /// Returns false when the control is disabled and nothing moved
    pub fn on_prev_click(&mut self) -> bool {
        self.activate(SliderControl::Prev)
    }

    pub fn on_next_click(&mut self) -> bool {
        self.activate(SliderControl::Next)
    }

    /// Arrow keys press the matching control
    pub fn on_key(&mut self, key: ArrowKey) -> bool {
        match key {
            ArrowKey::Left => self.on_prev_click(),
            ArrowKey::Right => self.on_next_click(),
        }
    }

    fn activate(&mut self, control: SliderControl) -> bool {
        if !self.is_enabled(control) {
            return false;
        }
        let delta = match control {
            SliderControl::Prev => -self.step,
            SliderControl::Next => self.step,
        };
        self.scroll_by(delta);
        true
    }

    fn set_extent(&mut self, content_width: f32, viewport_width: f32) {
        self.content_width = sanitize(content_width).max(0.0);
        self.viewport_width = sanitize(viewport_width).max(0.0);
        self.max_offset = (self.content_width - self.viewport_width).max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset);
    }

    fn refresh_controls(&mut self) {
        self.boundary = Boundary {
            at_start: self.offset <= 0.0,
            at_end: self.offset >= self.max_offset - self.edge_tolerance,
        };
        self.view
            .set_control_style(SliderControl::Prev, self.control_style(SliderControl::Prev));
        self.view
            .set_control_style(SliderControl::Next, self.control_style(SliderControl::Next));
    }
}

// Non-finite input from a host is treated as no movement.
fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slider::NullSliderView;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct TrackView {
        scrolled_to: Vec<f32>,
        styles: HashMap<SliderControl, ControlStyle>,
    }

    impl SliderView for TrackView {
        fn scroll_to(&mut self, offset: f32) {
            self.scrolled_to.push(offset);
        }

        fn set_control_style(&mut self, control: SliderControl, style: ControlStyle) {
            self.styles.insert(control, style);
        }
    }

    // Six 300px cards with 20px gaps in a 700px viewport
    fn slider() -> ScrollSlider<TrackView> {
        ScrollSlider::new(1900.0, 700.0, TrackView::default(), SliderOptions::default())
    }

    #[test]
    fn test_initial_state_disables_prev() {
        let s = slider();
        assert_eq!(s.max_offset(), 1200.0);
        assert!(s.boundary().at_start);
        assert!(!s.boundary().at_end);
        assert_eq!(s.view().styles[&SliderControl::Prev], ControlStyle::DISABLED);
        assert_eq!(s.view().styles[&SliderControl::Next], ControlStyle::ENABLED);
    }

    #[test]
    fn test_offset_stays_clamped() {
        let mut s = slider();
        for delta in [500.0, 900.0, -2000.0, 320.0, 10_000.0, -1.0, f32::NAN, -320.0] {
            s.scroll_by(delta);
            assert!(s.offset() >= 0.0 && s.offset() <= s.max_offset());
        }
    }

    #[test]
    fn test_end_is_detected_within_tolerance() {
        let mut s = slider();
        s.on_scroll(1196.0);
        assert!(s.boundary().at_end);
        assert_eq!(s.view().styles[&SliderControl::Next], ControlStyle::DISABLED);

        s.on_scroll(1194.0);
        assert!(!s.boundary().at_end);
    }

    #[test]
    fn test_at_max_disables_next() {
        let mut s = slider();
        s.scroll_by(5000.0);
        assert_eq!(s.offset(), s.max_offset());
        assert!(s.boundary().at_end);
        assert!(!s.is_enabled(SliderControl::Next));
        assert_eq!(s.control_style(SliderControl::Prev), ControlStyle::ENABLED);
    }

    #[test]
    fn test_clicks_step_by_card_width() {
        let mut s = slider();
        assert!(s.on_next_click());
        assert!(s.on_next_click());
        assert_eq!(s.offset(), 640.0);
        assert!(s.on_prev_click());
        assert_eq!(s.offset(), 320.0);
        assert_eq!(s.view().scrolled_to, vec![320.0, 640.0, 320.0]);
    }

    #[test]
    fn test_disabled_control_is_inert() {
        let mut s = slider();
        assert!(!s.on_prev_click());
        assert_eq!(s.offset(), 0.0);
        assert!(s.view().scrolled_to.is_empty());
    }

    #[test]
    fn test_keys_follow_click_path() {
        let mut s = slider();
        assert!(!s.on_key(ArrowKey::Left));
        assert!(s.on_key(ArrowKey::Right));
        assert_eq!(s.offset(), 320.0);
        for _ in 0..10 {
            s.on_key(ArrowKey::Right);
        }
        assert_eq!(s.offset(), 1200.0);
        assert!(!s.on_key(ArrowKey::Right));
    }

    #[test]
    fn test_resize_reclamps_offset() {
        let mut s = slider();
        s.scroll_by(1200.0);
        s.on_resize(1900.0, 1500.0);
        assert_eq!(s.max_offset(), 400.0);
        assert_eq!(s.offset(), 400.0);
        assert_eq!(s.view().scrolled_to.last(), Some(&400.0));
        assert!(s.boundary().at_end);
    }

    #[test]
    fn test_content_narrower_than_viewport() {
        let s = ScrollSlider::new(300.0, 700.0, NullSliderView, SliderOptions::default());
        assert_eq!(s.max_offset(), 0.0);
        assert!(s.boundary().at_start);
        assert!(s.boundary().at_end);
    }
}
