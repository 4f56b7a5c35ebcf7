use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use glide_core::config::KeymapConfig;
use glide_core::ArrowKey;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Runtime keymap for key-to-action lookup
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        let configured = [
            (&config.quit, Action::Quit),
            (&config.carousel_prev, Action::CarouselPrev),
            (&config.carousel_next, Action::CarouselNext),
            (&config.slider_prev, Action::SliderPrev),
            (&config.slider_next, Action::SliderNext),
            (&config.toggle_autoplay, Action::ToggleAutoplay),
        ];

        for (key_str, action) in configured {
            let Some(binding) = parse_key_binding(key_str) else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
                continue;
            };
            if let Some(existing) = bindings.get(&binding) {
                warn!(
                    "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                    key_str, existing, action
                );
            } else {
                bindings.insert(binding, action);
            }
        }

        // Not configurable
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.insert(
            KeyBinding::simple(KeyCode::Left),
            Action::SliderKey(ArrowKey::Left),
        );
        bindings.insert(
            KeyBinding::simple(KeyCode::Right),
            Action::SliderKey(ArrowKey::Right),
        );

        Self { bindings }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Display string of the first key bound to `action`, for help hints
    pub fn describe(&self, action: Action) -> Option<String> {
        let mut keys: Vec<(bool, String)> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(binding, _)| (!binding.modifiers.is_empty(), describe_binding(binding)))
            .collect();
        keys.sort();
        keys.into_iter().next().map(|(_, key)| key)
    }
}

fn describe_binding(binding: &KeyBinding) -> String {
    let key = match binding.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    };
    if binding.modifiers.contains(KeyModifiers::CONTROL) {
        format!("C-{}", key)
    } else {
        key
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "j", "k", "h", "l", "q", etc.
/// - Uppercase (Shift): "G", "N", etc.
/// - Ctrl: "<C-j>", "<C-k>", etc.
/// - Shift: "<S-Tab>", "<S-g>", etc.
/// - Special keys: "<CR>", "<Esc>", "<Tab>", "<Space>", "<Left>", "<Right>", "<F1>".."<F12>"
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        return parse_key_name(rest).map(KeyBinding::ctrl);
    }
    if let Some(rest) = inner.strip_prefix("S-") {
        return parse_key_name(rest).map(KeyBinding::shift);
    }
    parse_key_name(inner).map(KeyBinding::simple)
}

fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&n).then_some(KeyCode::F(n));
            }
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c.to_ascii_lowercase())
        }
    };
    Some(code)
}
