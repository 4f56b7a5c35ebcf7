//! Scroll configuration helpers (the types live in glide-core)

use std::time::Duration;

pub use glide_core::{EasingType, ScrollConfig};

pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Frame interval while an animation runs
    fn animation_tick_duration(&self) -> Duration;

    /// Smooth scrolling is on and has a non-zero duration
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        match self.animation_fps {
            0 => Duration::from_millis(16),
            fps => Duration::from_secs(1) / fps,
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}
