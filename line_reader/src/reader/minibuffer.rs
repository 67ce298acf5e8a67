// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keys read directly by widgets, outside of keymap resolution: the char after `f`,
//! `r` or `quoted-insert`, and small prompts shown below the buffer.

use std::time::Duration;

use crate::{KeyPress, LineReader, ReadKey, SpecialKey, Unwind, common_prefix};

pub(crate) fn is_enter(key: KeyPress) -> bool {
    key == KeyPress::special(SpecialKey::Enter)
        || key == KeyPress::ctrl('j')
        || key == KeyPress::ctrl('m')
}

pub(crate) fn is_backspace(key: KeyPress) -> bool {
    key == KeyPress::special(SpecialKey::Backspace) || key == KeyPress::ctrl('h')
}

pub(crate) fn is_tab(key: KeyPress) -> bool {
    key == KeyPress::special(SpecialKey::Tab) || key == KeyPress::ctrl('i')
}

impl LineReader {
    /// Block for the next key.
    pub(crate) fn read_key(&mut self) -> Result<KeyPress, Unwind> {
        loop {
            match self.input.next_key(None)? {
                ReadKey::Key(key) => return Ok(key),
                ReadKey::Timeout => continue,
                ReadKey::EndOfInput => return Err(Unwind::EndOfInput),
            }
        }
    }

    /// Wait up to `timeout` for a key and push it back unread. `false` on timeout.
    pub(crate) fn peek_key(&mut self, timeout: Duration) -> Result<bool, Unwind> {
        match self.input.next_key(Some(timeout))? {
            ReadKey::Key(key) => {
                self.input.push_front_keys(&[key]);
                Ok(true)
            }
            ReadKey::Timeout | ReadKey::EndOfInput => Ok(false),
        }
    }

    /// Read the key a widget takes as its argument. It counts as one of the keys that
    /// invoked the widget, so `.` replays it.
    pub(crate) fn read_key_argument(&mut self) -> Result<KeyPress, Unwind> {
        let key = self.read_key()?;
        self.state.keys.push(key);
        Ok(key)
    }

    /// Read a line of text below the buffer. `None` if the user cancels with Ctrl-G or
    /// Esc; Ctrl-C interrupts the whole read. Tab completes against `completions`.
    pub(crate) fn read_minibuffer(
        &mut self,
        prompt: &str,
        completions: &[&str],
    ) -> Result<Option<String>, Unwind> {
        let mut text = String::new();
        let result = loop {
            self.state.minibuffer = Some(format!("{prompt}{text}_"));
            self.redisplay()?;
            let key = self.read_key()?;
            match key {
                _ if is_enter(key) => break Some(text),
                _ if key == KeyPress::ctrl('g') || key == KeyPress::special(SpecialKey::Esc) => {
                    break None;
                }
                _ if key == KeyPress::ctrl('c') => {
                    self.state.minibuffer = None;
                    return Err(Unwind::Interrupted);
                }
                _ if is_backspace(key) => {
                    text.pop();
                }
                _ if key == KeyPress::ctrl('u') => text.clear(),
                _ if is_tab(key) => {
                    let matches: Vec<&str> = completions
                        .iter()
                        .copied()
                        .filter(|it| it.starts_with(text.as_str()))
                        .collect();
                    match common_prefix(&matches, false) {
                        Some(prefix) if prefix.len() > text.len() => text = prefix,
                        _ => self.beep()?,
                    }
                }
                _ => match key.printable_char() {
                    Some(ch) => text.push(ch),
                    None => self.beep()?,
                },
            }
        };
        self.state.minibuffer = None;
        Ok(result)
    }
}
