// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque,
          io,
          time::{Duration, Instant}};

use crossterm::{event::{self, Event},
                terminal};

use super::{KeyPress, KeySource, ReadKey, convert_key_event};

/// Reads key events from the real terminal via crossterm. Raw mode is enabled for the
/// lifetime of this value and restored on drop.
#[derive(Debug)]
pub struct CrosstermKeySource {
    /// Keys from a bracketed paste, served one at a time.
    pasted: VecDeque<KeyPress>,
    width: Option<u16>,
}

impl CrosstermKeySource {
    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled (stdin is not a terminal).
    pub fn try_new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let width = terminal::size().ok().map(|(columns, _)| columns);
        tracing::debug!(message = "raw mode enabled", ?width);
        Ok(Self {
            pasted: VecDeque::new(),
            width,
        })
    }
}

impl Drop for CrosstermKeySource {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::error!(message = "failed to disable raw mode", ?err);
        }
    }
}

impl KeySource for CrosstermKeySource {
    fn read_key(&mut self, timeout: Option<Duration>) -> io::Result<ReadKey> {
        if let Some(key) = self.pasted.pop_front() {
            return Ok(ReadKey::Key(key));
        }

        let deadline = timeout.map(|it| Instant::now() + it);
        loop {
            if let Some(deadline) = deadline {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if !event::poll(remaining)? {
                    return Ok(ReadKey::Timeout);
                }
            }

            match event::read()? {
                Event::Key(key_event) => {
                    if let Some(key) = convert_key_event(&key_event) {
                        return Ok(ReadKey::Key(key));
                    }
                }
                Event::Paste(text) => {
                    self.pasted.extend(text.chars().map(KeyPress::ch));
                    if let Some(key) = self.pasted.pop_front() {
                        return Ok(ReadKey::Key(key));
                    }
                }
                Event::Resize(columns, _) => self.width = Some(columns),
                _ => {}
            }
        }
    }

    fn terminal_width(&self) -> Option<u16> { self.width }
}
