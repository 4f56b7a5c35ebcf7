use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Auto-advance on start
    #[serde(default = "default_true")]
    pub autoplay: bool,
    /// Auto-advance interval in milliseconds
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
    /// Pause auto-advance while the mouse is over the carousel
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,
    /// Slides shown by the terminal host
    #[serde(default = "default_slides")]
    pub slides: Vec<SlideContent>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: default_true(),
            interval_ms: default_interval(),
            pause_on_hover: default_true(),
            slides: default_slides(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl SlideContent {
    fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Distance moved per click or arrow key
    #[serde(default = "default_step")]
    pub step: f32,
    /// Card width in track units
    #[serde(default = "default_card_width")]
    pub card_width: f32,
    /// Gap between cards in track units
    #[serde(default = "default_card_gap")]
    pub card_gap: f32,
    /// Slack when detecting the end of the track
    #[serde(default = "default_edge_tolerance")]
    pub edge_tolerance: f32,
    /// Card captions shown by the terminal host
    #[serde(default = "default_cards")]
    pub cards: Vec<String>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            card_width: default_card_width(),
            card_gap: default_card_gap(),
            edge_tolerance: default_edge_tolerance(),
            cards: default_cards(),
        }
    }
}

impl SliderConfig {
    /// Width of the whole card strip
    pub fn content_width(&self) -> f32 {
        let n = self.cards.len() as f32;
        if n == 0.0 {
            return 0.0;
        }
        n * self.card_width + (n - 1.0) * self.card_gap
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Quiet period before a terminal resize is applied
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,
    /// Track units drawn per terminal column
    #[serde(default = "default_units_per_column")]
    pub units_per_column: f32,
    /// Smooth scrolling of the slider track
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            resize_debounce_ms: default_resize_debounce(),
            units_per_column: default_units_per_column(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve for animated scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate track movement
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation length in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while an animation runs
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Show the previous slide
    #[serde(default = "default_key_carousel_prev")]
    pub carousel_prev: String,
    /// Show the next slide
    #[serde(default = "default_key_carousel_next")]
    pub carousel_next: String,
    /// Scroll the card strip left (arrow keys are always bound too)
    #[serde(default = "default_key_slider_prev")]
    pub slider_prev: String,
    /// Scroll the card strip right
    #[serde(default = "default_key_slider_next")]
    pub slider_next: String,
    /// Start or stop auto-advance
    #[serde(default = "default_key_toggle_autoplay")]
    pub toggle_autoplay: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            carousel_prev: default_key_carousel_prev(),
            carousel_next: default_key_carousel_next(),
            slider_prev: default_key_slider_prev(),
            slider_next: default_key_slider_next(),
            toggle_autoplay: default_key_toggle_autoplay(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_carousel_prev() -> String { "k".to_string() }
fn default_key_carousel_next() -> String { "j".to_string() }
fn default_key_slider_prev() -> String { "h".to_string() }
fn default_key_slider_next() -> String { "l".to_string() }
fn default_key_toggle_autoplay() -> String { "<Space>".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    4000
}

fn default_slides() -> Vec<SlideContent> {
    vec![
        SlideContent::new("Snap a photo", "Point the camera at a plate and let the app do the rest."),
        SlideContent::new("Instant breakdown", "Calories, protein, carbs and fat estimated per meal."),
        SlideContent::new("Daily trends", "Charts of what you ate this week against your targets."),
        SlideContent::new("Your data, your server", "Self-hosted and open source from top to bottom."),
    ]
}

fn default_step() -> f32 {
    320.0 // one card plus gap
}

fn default_card_width() -> f32 {
    300.0
}

fn default_card_gap() -> f32 {
    20.0
}

fn default_edge_tolerance() -> f32 {
    5.0
}

fn default_cards() -> Vec<String> {
    ["Home", "Camera", "Meal detail", "Weekly stats", "History", "Profile", "Settings"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_resize_debounce() -> u64 {
    10
}

fn default_units_per_column() -> f32 {
    10.0
}

fn default_animation_duration() -> u64 {
    150
}

fn default_animation_fps() -> u32 {
    60
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/glide/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("glide")
            .join("config.toml")
    }
}
