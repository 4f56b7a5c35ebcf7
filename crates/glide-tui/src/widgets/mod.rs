mod carousel;
mod slider;
mod status_bar;

pub use carousel::CarouselWidget;
pub use slider::SliderWidget;
pub use status_bar::StatusBarWidget;
