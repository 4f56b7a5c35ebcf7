//! Smooth scrolling of the slider track
//!
//! The slider controller decides where the track should be; this module only
//! animates the drawn offset towards that target with a configurable easing
//! curve.
//!
//! - `easing` - Pure easing functions (cubic, quintic, exponential)
//! - `timing` - Time calculation utilities (progress, interpolation)
//! - `config` - Configuration types (re-exported from glide-core)
//! - `animation` - Animator combining the above
//!
//! # Usage
//!
//! ```ignore
//! use glide_tui::scroll::{ScrollAnimator, ScrollConfig};
//!
//! let mut animator = ScrollAnimator::new(ScrollConfig::default());
//!
//! // Controller moved the track
//! animator.scroll_to(320.0);
//!
//! // In the main loop, advance each frame and draw at the returned offset
//! let offset = animator.update();
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
