// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use serde::{Deserialize, Serialize};

use super::ModifierKeysMask;

/// Examples.
///
/// ```rust
/// use r3bl_line_reader::*;
///
/// let a = keypress!(@char 'a');
/// let ctrl_a = keypress!(@char ModifierKeysMask::new().with_ctrl(), 'a');
/// let enter = keypress!(@special SpecialKey::Enter);
/// let f1 = keypress!(@fn FunctionKey::F1);
/// assert_eq!(ctrl_a, KeyPress::ctrl('a'));
/// # let _ = (a, enter, f1);
/// ```
#[macro_export]
macro_rules! keypress {
    // @char
    (@char $arg_char : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::Character($arg_char),
        }
    };

    (@char $arg_modifiers : expr, $arg_char : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::Character($arg_char),
        }
    };

    // @special
    (@special $arg_special : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    (@special $arg_modifiers : expr, $arg_special : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    // @fn
    (@fn $arg_function : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::FunctionKey($arg_function),
        }
    };
}

/// A single key press, independent of the terminal backend that produced it.
///
/// Values are kept in a normal form so that they can be used as keymap keys:
/// - shift is never recorded for [`Key::Character`] (the char already carries case),
/// - ctrl letters are stored lowercase,
/// - a press without modifiers is always [`KeyPress::Plain`].
///
/// Use [`KeyPress::new`] (or the shortcuts) to get the normal form. The [`keypress!`]
/// macro builds the variants verbatim.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum Key {
    /// Any [char], printable or not. A raw control code (`'\x01'`) is never produced by
    /// [`KeyPress::new`]; it becomes a ctrl modified letter instead.
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(FunctionKey),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum SpecialKey {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab,
    Delete,
    Insert,
    Esc,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum FunctionKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl FunctionKey {
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Some(match number {
            1 => FunctionKey::F1,
            2 => FunctionKey::F2,
            3 => FunctionKey::F3,
            4 => FunctionKey::F4,
            5 => FunctionKey::F5,
            6 => FunctionKey::F6,
            7 => FunctionKey::F7,
            8 => FunctionKey::F8,
            9 => FunctionKey::F9,
            10 => FunctionKey::F10,
            11 => FunctionKey::F11,
            12 => FunctionKey::F12,
            _ => return None,
        })
    }

    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            FunctionKey::F1 => 1,
            FunctionKey::F2 => 2,
            FunctionKey::F3 => 3,
            FunctionKey::F4 => 4,
            FunctionKey::F5 => 5,
            FunctionKey::F6 => 6,
            FunctionKey::F7 => 7,
            FunctionKey::F8 => 8,
            FunctionKey::F9 => 9,
            FunctionKey::F10 => 10,
            FunctionKey::F11 => 11,
            FunctionKey::F12 => 12,
        }
    }
}

impl KeyPress {
    /// Build a key press in normal form. Raw ASCII control codes are turned into their
    /// ctrl letter, DEL into backspace, and ESC / CR / TAB into special keys.
    #[must_use]
    pub fn new(key: Key, mask: ModifierKeysMask) -> Self {
        let (key, mask) = match key {
            Key::Character(ch) => normalize_char(ch, mask),
            Key::SpecialKey(SpecialKey::Tab) if mask.is_shift() => {
                (Key::SpecialKey(SpecialKey::BackTab), mask.without_shift())
            }
            other => (other, mask),
        };
        if mask.is_empty() {
            KeyPress::Plain { key }
        } else {
            KeyPress::WithModifiers { key, mask }
        }
    }

    #[must_use]
    pub fn ch(ch: char) -> Self { Self::new(Key::Character(ch), ModifierKeysMask::new()) }

    #[must_use]
    pub fn ctrl(ch: char) -> Self {
        Self::new(Key::Character(ch), ModifierKeysMask::new().with_ctrl())
    }

    #[must_use]
    pub fn alt(ch: char) -> Self {
        Self::new(Key::Character(ch), ModifierKeysMask::new().with_alt())
    }

    #[must_use]
    pub fn ctrl_alt(ch: char) -> Self {
        Self::new(
            Key::Character(ch),
            ModifierKeysMask::new().with_ctrl().with_alt(),
        )
    }

    #[must_use]
    pub fn special(special: SpecialKey) -> Self {
        Self::new(Key::SpecialKey(special), ModifierKeysMask::new())
    }

    #[must_use]
    pub fn special_with(special: SpecialKey, mask: ModifierKeysMask) -> Self {
        Self::new(Key::SpecialKey(special), mask)
    }

    #[must_use]
    pub fn function(function: FunctionKey) -> Self {
        Self::new(Key::FunctionKey(function), ModifierKeysMask::new())
    }

    #[must_use]
    pub fn key(&self) -> Key {
        match self {
            KeyPress::Plain { key } | KeyPress::WithModifiers { key, .. } => *key,
        }
    }

    #[must_use]
    pub fn mask(&self) -> ModifierKeysMask {
        match self {
            KeyPress::Plain { .. } => ModifierKeysMask::new(),
            KeyPress::WithModifiers { mask, .. } => *mask,
        }
    }

    #[must_use]
    pub fn is_alt(&self) -> bool { self.mask().is_alt() }

    #[must_use]
    pub fn is_ctrl(&self) -> bool { self.mask().is_ctrl() }

    /// The same key with alt released. Used by the `self-insert-unmeta` widget.
    #[must_use]
    pub fn without_alt(&self) -> Self { Self::new(self.key(), self.mask().without_alt()) }

    /// The printable char this key would insert, if any: a plain, non control
    /// character.
    #[must_use]
    pub fn printable_char(&self) -> Option<char> {
        match self {
            KeyPress::Plain {
                key: Key::Character(ch),
            } if !ch.is_control() => Some(*ch),
            _ => None,
        }
    }

    /// The char to insert for this key, including the ones bound to special keys
    /// (Enter inserts a newline, Tab inserts a tab).
    #[must_use]
    pub fn insertable_char(&self) -> Option<char> {
        if let Some(ch) = self.printable_char() {
            return Some(ch);
        }
        match self {
            KeyPress::Plain {
                key: Key::SpecialKey(SpecialKey::Enter),
            } => Some('\n'),
            KeyPress::Plain {
                key: Key::SpecialKey(SpecialKey::Tab),
            } => Some('\t'),
            _ if self.is_ctrl() && !self.is_alt() => match self.key() {
                Key::Character('j') => Some('\n'),
                Key::Character('i') => Some('\t'),
                _ => None,
            },
            _ => None,
        }
    }

    /// Alphabetic characters folded to lowercase, used by `do-lowercase-version`.
    #[must_use]
    pub fn to_lowercase(&self) -> Option<Self> {
        match self.key() {
            Key::Character(ch) if ch.is_uppercase() => {
                let lower = ch.to_lowercase().next()?;
                Some(Self::new(Key::Character(lower), self.mask()))
            }
            _ => None,
        }
    }

    /// The digit value of a plain (or alt modified) digit key.
    #[must_use]
    pub fn digit_value(&self) -> Option<u32> {
        match self.key() {
            Key::Character(ch) if !self.is_ctrl() => ch.to_digit(10),
            _ => None,
        }
    }

    /// Is this the `^D` key, in any of its encodings.
    #[must_use]
    pub fn is_ctrl_d(&self) -> bool { *self == KeyPress::ctrl('d') }
}

fn normalize_char(ch: char, mask: ModifierKeysMask) -> (Key, ModifierKeysMask) {
    let mask = mask.without_shift();
    match ch {
        '\x1b' => (Key::SpecialKey(SpecialKey::Esc), mask),
        '\r' => (Key::SpecialKey(SpecialKey::Enter), mask),
        '\t' => (Key::SpecialKey(SpecialKey::Tab), mask),
        '\x7f' => (Key::SpecialKey(SpecialKey::Backspace), mask),
        '\0' => (Key::Character('@'), mask.with_ctrl()),
        '\x01'..='\x1a' => {
            let letter = char::from(b'a' + (ch as u8 - 1));
            (Key::Character(letter), mask.with_ctrl())
        }
        '\x1c'..='\x1f' => {
            let symbol = char::from(b'\\' + (ch as u8 - 0x1c));
            (Key::Character(symbol), mask.with_ctrl())
        }
        _ if mask.is_ctrl() => {
            // ^M ^I ^[ are the same bytes as Enter, Tab, and Esc on a terminal.
            let without_ctrl = ModifierKeysMask {
                ctrl_key_state: super::KeyState::NotPressed,
                ..mask
            };
            match ch.to_ascii_lowercase() {
                'm' => (Key::SpecialKey(SpecialKey::Enter), without_ctrl),
                'i' => (Key::SpecialKey(SpecialKey::Tab), without_ctrl),
                '[' => (Key::SpecialKey(SpecialKey::Esc), without_ctrl),
                '?' => (Key::SpecialKey(SpecialKey::Backspace), without_ctrl),
                lower => (Key::Character(lower), mask),
            }
        }
        _ => (Key::Character(ch), mask),
    }
}

/// Rendered in the same notation that the key sequence parser accepts.
impl Display for KeyPress {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mask = self.mask();
        if mask.is_alt() {
            write!(f, "\\e")?;
        }
        match self.key() {
            Key::Character(ch) if mask.is_ctrl() => write!(f, "^{}", ch.to_ascii_uppercase()),
            Key::Character('\\') => write!(f, "\\\\"),
            Key::Character('^') => write!(f, "\\^"),
            Key::Character('<') => write!(f, "\\<"),
            Key::Character(' ') => write!(f, "<Space>"),
            Key::Character(ch) => write!(f, "{ch}"),
            Key::SpecialKey(special) => {
                let prefix = if mask.is_ctrl() {
                    "C-"
                } else if mask.is_shift() {
                    "S-"
                } else {
                    ""
                };
                write!(f, "<{prefix}{}>", special_key_name(special))
            }
            Key::FunctionKey(function) => write!(f, "<F{}>", function.number()),
        }
    }
}

#[must_use]
pub fn special_key_name(special: SpecialKey) -> &'static str {
    match special {
        SpecialKey::Backspace => "Backspace",
        SpecialKey::Enter => "Enter",
        SpecialKey::Left => "Left",
        SpecialKey::Right => "Right",
        SpecialKey::Up => "Up",
        SpecialKey::Down => "Down",
        SpecialKey::Home => "Home",
        SpecialKey::End => "End",
        SpecialKey::PageUp => "PageUp",
        SpecialKey::PageDown => "PageDown",
        SpecialKey::Tab => "Tab",
        SpecialKey::BackTab => "BackTab",
        SpecialKey::Delete => "Delete",
        SpecialKey::Insert => "Insert",
        SpecialKey::Esc => "Esc",
    }
}

/// Convert a crossterm key event. Only `Press` and `Repeat` kinds produce a key;
/// releases and bare modifier keys are dropped.
#[must_use]
pub fn convert_key_event(key_event: &KeyEvent) -> Option<KeyPress> {
    if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    let mask: ModifierKeysMask = key_event.modifiers.into();
    let key = match key_event.code {
        KeyCode::Char(ch) if mask.is_ctrl() => Key::Character(match ch {
            // Legacy terminals report ^\ ^] ^^ ^_ as ctrl + digit.
            '4' => '\\',
            '5' => ']',
            '6' => '^',
            '7' => '_',
            ' ' | '2' => '@',
            other => other,
        }),
        KeyCode::Char(ch) => Key::Character(ch),
        KeyCode::Null => return Some(KeyPress::ctrl('@')),
        KeyCode::Backspace => Key::SpecialKey(SpecialKey::Backspace),
        KeyCode::Enter => Key::SpecialKey(SpecialKey::Enter),
        KeyCode::Left => Key::SpecialKey(SpecialKey::Left),
        KeyCode::Right => Key::SpecialKey(SpecialKey::Right),
        KeyCode::Up => Key::SpecialKey(SpecialKey::Up),
        KeyCode::Down => Key::SpecialKey(SpecialKey::Down),
        KeyCode::Home => Key::SpecialKey(SpecialKey::Home),
        KeyCode::End => Key::SpecialKey(SpecialKey::End),
        KeyCode::PageUp => Key::SpecialKey(SpecialKey::PageUp),
        KeyCode::PageDown => Key::SpecialKey(SpecialKey::PageDown),
        KeyCode::Tab => Key::SpecialKey(SpecialKey::Tab),
        KeyCode::BackTab => {
            return Some(KeyPress::new(
                Key::SpecialKey(SpecialKey::BackTab),
                mask.without_shift(),
            ));
        }
        KeyCode::Delete => Key::SpecialKey(SpecialKey::Delete),
        KeyCode::Insert => Key::SpecialKey(SpecialKey::Insert),
        KeyCode::Esc => Key::SpecialKey(SpecialKey::Esc),
        KeyCode::F(number) => Key::FunctionKey(FunctionKey::from_number(number)?),
        _ => return None,
    };
    Some(KeyPress::new(key, mask))
}
