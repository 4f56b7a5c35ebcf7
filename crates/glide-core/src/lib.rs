pub mod carousel;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod service;
pub mod slider;
pub mod timer;

pub use carousel::{CarouselController, CarouselEvent, CarouselOptions, CarouselSnapshot};
pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use service::{CarouselCommand, CarouselHandle, CarouselService};
pub use slider::{ArrowKey, ScrollSlider, SliderOptions};
