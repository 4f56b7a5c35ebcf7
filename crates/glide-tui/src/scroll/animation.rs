//! Track animation controller
//!
//! Combines easing functions and timing utilities to move the drawn track
//! offset towards the offset chosen by the slider controller.

use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_f32, progress};

/// Active track animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f32,
    to: f32,
    duration: Duration,
    easing: EasingType,
}

/// Animated horizontal offset.
///
/// Call `scroll_to()` when the target changes, then `update()` each frame to
/// get the interpolated offset to draw.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Offset currently drawn
    current: f32,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final offset once the running animation ends
    pub fn target(&self) -> f32 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Jump without animating
    pub fn set_offset(&mut self, offset: f32) {
        self.animation = None;
        self.current = offset;
    }

    /// Animate from the currently drawn offset to `target`.
    ///
    /// Retargeting mid-flight starts from wherever the track is drawn now, so
    /// rapid clicks never snap backwards.
    pub fn scroll_to(&mut self, target: f32) {
        if !self.config.is_smooth() {
            self.set_offset(target);
            return;
        }

        if (self.current - target).abs() < f32::EPSILON {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: Instant::now(),
            from: self.current,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Advance the animation and return the offset to draw
    pub fn update(&mut self) -> f32 {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration) {
                self.current = anim.to;
                self.animation = None;
            } else {
                let t = progress(anim.start, anim.duration);
                let eased_t = anim.easing.apply(t);
                self.current = lerp_f32(anim.from, anim.to, eased_t);
            }
        }

        self.current
    }
}
