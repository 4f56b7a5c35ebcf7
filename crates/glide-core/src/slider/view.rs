use serde::Serialize;

/// The two boundary controls of a slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SliderControl {
    Prev,
    Next,
}

/// Pointer shape shown over a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PointerCursor {
    Default,
    Pointer,
}

/// Visual state of a boundary control
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlStyle {
    pub enabled: bool,
    pub opacity: f32,
    pub cursor: PointerCursor,
}

impl ControlStyle {
    pub const ENABLED: Self = Self {
        enabled: true,
        opacity: 1.0,
        cursor: PointerCursor::Pointer,
    };

    pub const DISABLED: Self = Self {
        enabled: false,
        opacity: 0.3,
        cursor: PointerCursor::Default,
    };

    pub fn for_enabled(enabled: bool) -> Self {
        if enabled {
            Self::ENABLED
        } else {
            Self::DISABLED
        }
    }
}

/// Host-side handles for a scroll track and its controls
pub trait SliderView {
    /// Move the track to `offset`. Hosts may animate the move.
    fn scroll_to(&mut self, offset: f32);

    fn set_control_style(&mut self, control: SliderControl, style: ControlStyle);
}

/// View that ignores every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSliderView;

impl SliderView for NullSliderView {
    fn scroll_to(&mut self, _offset: f32) {}

    fn set_control_style(&mut self, _control: SliderControl, _style: ControlStyle) {}
}
