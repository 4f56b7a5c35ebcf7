use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use glide_core::ArrowKey;

use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    CarouselPrev,
    CarouselNext,
    /// Digit keys: jump straight to a slide (0-based)
    GoToSlide(usize),
    ToggleAutoplay,
    SliderPrev,
    SliderNext,
    /// Arrow keys always drive the card strip
    SliderKey(ArrowKey),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, normalize_modifiers(key.code, key.modifiers));
    if let Some(action) = keymap.get(&binding) {
        return *action;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoToSlide(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}

// Terminals report uppercase letters with SHIFT, but some also set it for
// punctuation typed with shift; only keep it where bindings can express it.
fn normalize_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(c) if !c.is_ascii_alphabetic() => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    }
}
