//! Bounded horizontal scroll track with edge-aware controls

mod controller;
mod view;

pub use controller::{
    ArrowKey, Boundary, ScrollSlider, SliderOptions, DEFAULT_EDGE_TOLERANCE, DEFAULT_STEP,
};
pub use view::{ControlStyle, NullSliderView, PointerCursor, SliderControl, SliderView};
