use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, warn};

use glide_core::carousel::CarouselView;
use glide_core::debounce::Debounce;
use glide_core::slider::{ControlStyle, SliderControl, SliderView};
use glide_core::{
    AppConfig, CarouselController, CarouselOptions, Clock, ScrollSlider, SliderOptions,
    SystemClock,
};

use crate::input::Action;
use crate::layout::{AppLayout, HitTarget};
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// Track columns moved per mouse wheel notch
const WHEEL_COLUMNS: f32 = 3.0;

/// Active flags of the drawn slides and dots
#[derive(Debug, Clone, Default)]
pub struct DeckView {
    pub slides: Vec<bool>,
    pub dots: Vec<bool>,
    /// Accessible labels, shown when a dot is hovered
    pub labels: Vec<String>,
}

impl CarouselView for DeckView {
    fn build_indicators(&mut self, labels: &[String]) {
        self.labels = labels.to_vec();
        self.slides = vec![false; labels.len()];
        self.dots = vec![false; labels.len()];
    }

    fn set_slide_active(&mut self, index: usize, active: bool) {
        if let Some(flag) = self.slides.get_mut(index) {
            *flag = active;
        }
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(flag) = self.dots.get_mut(index) {
            *flag = active;
        }
    }
}

/// Drawn state of the card strip: animated offset plus arrow styles
#[derive(Debug, Clone)]
pub struct TrackView {
    pub animator: ScrollAnimator,
    pub prev: ControlStyle,
    pub next: ControlStyle,
}

impl TrackView {
    pub fn new(animator: ScrollAnimator) -> Self {
        Self {
            animator,
            prev: ControlStyle::DISABLED,
            next: ControlStyle::DISABLED,
        }
    }

    pub fn style(&self, control: SliderControl) -> ControlStyle {
        match control {
            SliderControl::Prev => self.prev,
            SliderControl::Next => self.next,
        }
    }
}

impl SliderView for TrackView {
    fn scroll_to(&mut self, offset: f32) {
        self.animator.scroll_to(offset);
    }

    fn set_control_style(&mut self, control: SliderControl, style: ControlStyle) {
        match control {
            SliderControl::Prev => self.prev = style,
            SliderControl::Next => self.next = style,
        }
    }
}

/// Main application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    /// None when no slides are configured; the carousel is then not wired
    pub carousel: Option<CarouselController<DeckView>>,
    pub slider: ScrollSlider<TrackView>,
    /// Areas drawn in the last frame
    pub layout: AppLayout,
    /// Dot under the pointer, for showing its label
    pub hovered_dot: Option<usize>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    clock: Arc<dyn Clock>,
    resize: Debounce<u16>,
    /// Track width in columns the slider bounds were last computed for
    applied_track_columns: Option<u16>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        Self::with_clock(config, theme, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Arc<AppConfig>, theme: Theme, clock: Arc<dyn Clock>) -> Self {
        let carousel = match CarouselController::new(
            config.carousel.slides.len(),
            DeckView::default(),
            clock.clone(),
            CarouselOptions::from(&config.carousel),
        ) {
            Ok(carousel) => Some(carousel),
            Err(e) => {
                warn!("Carousel not wired: {}", e);
                None
            }
        };

        // Viewport is unknown until the first frame is laid out
        let slider = ScrollSlider::new(
            config.slider.content_width(),
            0.0,
            TrackView::new(ScrollAnimator::new(config.ui.scroll.clone())),
            SliderOptions::from(&config.slider),
        );

        let resize = Debounce::new(Duration::from_millis(config.ui.resize_debounce_ms));

        Self {
            config,
            theme,
            carousel,
            slider,
            layout: AppLayout::default(),
            hovered_dot: None,
            status_message: None,
            should_quit: false,
            clock,
            resize,
            applied_track_columns: None,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.carousel.as_ref().map_or(0, |c| c.slide_count())
    }

    /// Track units drawn per terminal column
    pub fn units_per_column(&self) -> f32 {
        let units = self.config.ui.units_per_column;
        if units.is_finite() && units > 0.0 {
            units
        } else {
            1.0
        }
    }

    /// Record the areas of this frame. The first layout is applied to the
    /// slider at once; later track width changes wait for the resize quiet
    /// period.
    pub fn set_layout(&mut self, layout: AppLayout) {
        let columns = layout.track.width;
        match self.applied_track_columns {
            None => self.apply_track_width(columns),
            Some(applied) if applied != columns => {
                self.resize.push(columns, self.clock.now());
            }
            Some(_) => self.resize.cancel(),
        }
        self.layout = layout;
    }

    fn apply_track_width(&mut self, columns: u16) {
        self.applied_track_columns = Some(columns);
        let viewport = f32::from(columns) * self.units_per_column();
        debug!("Track viewport: {} columns, {:.0} units", columns, viewport);
        self.slider
            .on_resize(self.config.slider.content_width(), viewport);
    }

    /// Periodic work: auto-advance, pending resize
    pub fn on_tick(&mut self) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.on_tick();
        }
        if let Some(columns) = self.resize.poll(self.clock.now()) {
            self.apply_track_width(columns);
        }
    }

    /// Advance the track animation and return the offset to draw
    pub fn update_animation(&mut self) -> f32 {
        self.slider.view_mut().animator.update()
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.slider.view().animator.is_animating() || self.resize.is_pending()
    }

    /// Time until the carousel's next auto-advance, if one is scheduled
    pub fn time_until_advance(&self) -> Option<Duration> {
        self.carousel.as_ref()?.time_until_advance()
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::CarouselPrev => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.previous();
                }
            }
            Action::CarouselNext => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.next();
                }
            }
            Action::GoToSlide(index) => self.go_to_slide(index),
            Action::ToggleAutoplay => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.toggle_autoplay();
                    let state = if carousel.is_autoplay() { "on" } else { "off" };
                    self.status_message = Some(format!("Autoplay {}", state));
                }
            }
            Action::SliderPrev => {
                self.slider.on_prev_click();
            }
            Action::SliderNext => {
                self.slider.on_next_click();
            }
            Action::SliderKey(key) => {
                self.slider.on_key(key);
            }
            Action::None => {}
        }
    }

    fn go_to_slide(&mut self, index: usize) {
        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        match carousel.go_to(index) {
            Ok(()) => self.status_message = None,
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        self.update_hover(column, row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(column, row),
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollUp => {
                self.wheel(column, row, -WHEEL_COLUMNS)
            }
            MouseEventKind::ScrollRight | MouseEventKind::ScrollDown => {
                self.wheel(column, row, WHEEL_COLUMNS)
            }
            _ => {}
        }
    }

    fn update_hover(&mut self, column: u16, row: u16) {
        let over = self.layout.is_over_carousel(column, row);
        self.hovered_dot = match self.layout.hit_test(column, row) {
            HitTarget::Dot(i) => Some(i),
            _ => None,
        };

        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        if over && !carousel.is_hovered() {
            carousel.on_hover_enter();
        } else if !over && carousel.is_hovered() {
            carousel.on_hover_leave();
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        match self.layout.hit_test(column, row) {
            HitTarget::CarouselPrev => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_prev_click();
                }
            }
            HitTarget::CarouselNext => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_next_click();
                }
            }
            HitTarget::Dot(index) => {
                if let Some(carousel) = self.carousel.as_mut() {
                    if let Err(e) = carousel.on_indicator_click(index) {
                        self.status_message = Some(e.to_string());
                    }
                }
            }
            HitTarget::SliderPrev => {
                self.slider.on_prev_click();
            }
            HitTarget::SliderNext => {
                self.slider.on_next_click();
            }
            HitTarget::Track | HitTarget::None => {}
        }
    }

    /// Wheel over the track scrolls it directly, like a native scroll
    fn wheel(&mut self, column: u16, row: u16, columns: f32) {
        if self.layout.hit_test(column, row) != HitTarget::Track {
            return;
        }
        let drawn = self.slider.view().animator.current();
        self.slider
            .on_scroll(drawn + columns * self.units_per_column());
        let offset = self.slider.offset();
        self.slider.view_mut().animator.set_offset(offset);
    }

    /// Drop the status message (any key press does this)
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use glide_core::config::SlideContent;
    use glide_core::{ArrowKey, ManualClock};
    use ratatui::layout::Rect;

    fn app_with(config: AppConfig) -> (App, ManualClock) {
        let clock = ManualClock::new();
        let mut app = App::with_clock(Arc::new(config), Theme::default(), Arc::new(clock.clone()));
        app.set_layout(AppLayout::compute(Rect::new(0, 0, 80, 30), app.slide_count()));
        (app, clock)
    }

    fn instant_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.ui.scroll.smooth_enabled = false;
        config
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn cursor(app: &App) -> usize {
        app.carousel.as_ref().unwrap().cursor()
    }

    #[test]
    fn test_first_layout_sizes_slider() {
        let (app, _) = app_with(instant_config());
        let expected = f32::from(app.layout.track.width) * 10.0;
        assert_eq!(app.slider.viewport_width(), expected);
        assert!(app.slider.boundary().at_start);
        assert!(!app.slider.is_enabled(SliderControl::Prev));
    }

    #[test]
    fn test_autoplay_advances_on_tick() {
        let (mut app, clock) = app_with(instant_config());
        clock.advance(Duration::from_millis(4000));
        app.on_tick();
        assert_eq!(cursor(&app), 1);
        assert!(app.carousel.as_ref().unwrap().view().slides[1]);
    }

    #[test]
    fn test_hover_pauses_and_leave_resumes() {
        let (mut app, clock) = app_with(instant_config());
        let inside = app.layout.slide;
        app.handle_mouse(mouse(MouseEventKind::Moved, inside.x, inside.y));
        assert!(app.carousel.as_ref().unwrap().is_hovered());
        assert!(app.time_until_advance().is_none());

        clock.advance(Duration::from_millis(10_000));
        app.on_tick();
        assert_eq!(cursor(&app), 0);

        let status = app.layout.status;
        app.handle_mouse(mouse(MouseEventKind::Moved, status.x, status.y));
        assert!(!app.carousel.as_ref().unwrap().is_hovered());
        assert_eq!(app.time_until_advance(), Some(Duration::from_millis(4000)));
    }

    #[test]
    fn test_clicks_while_hovered_keep_autoplay_paused() {
        let (mut app, clock) = app_with(instant_config());
        let next = app.layout.carousel_next;
        app.handle_mouse(mouse(MouseEventKind::Moved, next.x, next.y));
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), next.x, next.y));
        assert_eq!(cursor(&app), 1);

        let dot = app.layout.dots[2];
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), dot.x, dot.y));
        assert_eq!(cursor(&app), 2);
        assert!(app.carousel.as_ref().unwrap().is_hovered());
        assert!(app.time_until_advance().is_none());

        clock.advance(Duration::from_millis(8000));
        app.on_tick();
        assert_eq!(cursor(&app), 2);
    }

    #[test]
    fn test_clicks_route_to_controls() {
        let (mut app, _) = app_with(instant_config());

        let next = app.layout.carousel_next;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), next.x, next.y));
        assert_eq!(cursor(&app), 1);

        let dot = app.layout.dots[3];
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), dot.x, dot.y));
        assert_eq!(cursor(&app), 3);
        assert_eq!(app.hovered_dot, Some(3));

        let slider_next = app.layout.slider_next;
        app.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            slider_next.x,
            slider_next.y,
        ));
        assert_eq!(app.slider.offset(), 320.0);
        assert_eq!(app.slider.view().animator.current(), 320.0);
    }

    #[test]
    fn test_disabled_prev_click_is_inert() {
        let (mut app, _) = app_with(instant_config());
        let prev = app.layout.slider_prev;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), prev.x, prev.y));
        assert_eq!(app.slider.offset(), 0.0);
        assert_eq!(app.slider.view().prev, ControlStyle::DISABLED);
    }

    #[test]
    fn test_wheel_over_track_scrolls_directly() {
        let (mut app, _) = app_with(instant_config());
        let track = app.layout.track;
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, track.x, track.y));
        assert_eq!(app.slider.offset(), 30.0);
        assert!(app.slider.is_enabled(SliderControl::Prev));

        app.handle_mouse(mouse(MouseEventKind::ScrollUp, track.x, track.y));
        app.handle_mouse(mouse(MouseEventKind::ScrollUp, track.x, track.y));
        assert_eq!(app.slider.offset(), 0.0);
    }

    #[test]
    fn test_resize_is_debounced() {
        let (mut app, clock) = app_with(instant_config());
        let before = app.slider.viewport_width();

        app.set_layout(AppLayout::compute(Rect::new(0, 0, 60, 30), 4));
        app.on_tick();
        assert_eq!(app.slider.viewport_width(), before);
        assert!(app.needs_fast_update());

        clock.advance(Duration::from_millis(10));
        app.on_tick();
        assert_eq!(
            app.slider.viewport_width(),
            f32::from(app.layout.track.width) * 10.0
        );
    }

    #[test]
    fn test_actions() {
        let (mut app, _) = app_with(instant_config());

        app.handle_action(Action::GoToSlide(2));
        assert_eq!(cursor(&app), 2);

        app.handle_action(Action::GoToSlide(7));
        assert_eq!(cursor(&app), 2);
        assert!(app.status_message.is_some());

        app.handle_action(Action::ToggleAutoplay);
        assert!(!app.carousel.as_ref().unwrap().is_autoplay());
        assert_eq!(app.status_message.as_deref(), Some("Autoplay off"));

        app.handle_action(Action::SliderKey(ArrowKey::Right));
        assert_eq!(app.slider.offset(), 320.0);

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_no_slides_leaves_carousel_unwired() {
        let mut config = instant_config();
        config.carousel.slides = Vec::<SlideContent>::new();
        let (mut app, _) = app_with(config);

        assert!(app.carousel.is_none());
        app.handle_action(Action::CarouselNext);
        app.handle_action(Action::GoToSlide(0));
        app.on_tick();
        assert!(app.layout.dots.is_empty());
    }
}
