//! Cyclic carousel with timed auto-advance

mod controller;
mod indicator;
mod view;

pub use controller::{CarouselController, CarouselEvent, CarouselOptions, CarouselSnapshot};
pub use indicator::{Indicator, IndicatorSet};
pub use view::{CarouselView, NullView};
