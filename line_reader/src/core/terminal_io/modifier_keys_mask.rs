// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyModifiers;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

impl KeyState {
    #[must_use]
    pub fn is_pressed(self) -> bool { matches!(self, KeyState::Pressed) }
}

impl From<bool> for KeyState {
    fn from(pressed: bool) -> Self {
        if pressed {
            KeyState::Pressed
        } else {
            KeyState::NotPressed
        }
    }
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn without_shift(mut self) -> Self {
        self.shift_key_state = KeyState::NotPressed;
        self
    }

    #[must_use]
    pub fn without_alt(mut self) -> Self {
        self.alt_key_state = KeyState::NotPressed;
        self
    }

    #[must_use]
    pub fn is_ctrl(&self) -> bool { self.ctrl_key_state.is_pressed() }

    #[must_use]
    pub fn is_alt(&self) -> bool { self.alt_key_state.is_pressed() }

    #[must_use]
    pub fn is_shift(&self) -> bool { self.shift_key_state.is_pressed() }

    /// No modifier is pressed.
    #[must_use]
    pub fn is_empty(&self) -> bool { !self.is_ctrl() && !self.is_alt() && !self.is_shift() }
}

/// Convert crossterm's bitflags. Modifiers other than shift, ctrl, and alt (super,
/// hyper, meta) are dropped.
impl From<KeyModifiers> for ModifierKeysMask {
    fn from(modifiers: KeyModifiers) -> Self {
        ModifierKeysMask {
            shift_key_state: modifiers.contains(KeyModifiers::SHIFT).into(),
            ctrl_key_state: modifiers.contains(KeyModifiers::CONTROL).into(),
            alt_key_state: modifiers.contains(KeyModifiers::ALT).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_crossterm_modifiers() {
        let mask: ModifierKeysMask = (KeyModifiers::CONTROL | KeyModifiers::ALT).into();
        assert_eq!(mask, ModifierKeysMask::new().with_ctrl().with_alt());
        assert!(!mask.is_shift());
    }

    #[test]
    fn test_empty_mask() {
        assert!(ModifierKeysMask::new().is_empty());
        assert!(!ModifierKeysMask::new().with_shift().is_empty());
        assert!(ModifierKeysMask::new().with_shift().without_shift().is_empty());
    }
}
