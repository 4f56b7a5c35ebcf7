/// Host-side handles for the visual parts of a carousel.
///
/// The controller owns one of these and routes every visual change through
/// it. A browser host would toggle an `active` class here, the terminal host
/// flips flags that its widgets read while drawing.
pub trait CarouselView {
    /// Called once at construction with one label per slide
    fn build_indicators(&mut self, _labels: &[String]) {}

    fn set_slide_active(&mut self, index: usize, active: bool);

    fn set_indicator_active(&mut self, index: usize, active: bool);
}

/// View that ignores every update (headless use)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl CarouselView for NullView {
    fn set_slide_active(&mut self, _index: usize, _active: bool) {}

    fn set_indicator_active(&mut self, _index: usize, _active: bool) {}
}
