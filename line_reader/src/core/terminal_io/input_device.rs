// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque, fmt::Debug, io, time::Duration};

use super::{KeyPress, KeySource, ReadKey};

/// Wraps a [`KeySource`] with a pushback queue. Keys pushed back are served before the
/// source is consulted again; this is how unconsumed keys from a failed multi-key match
/// and replayed macros re-enter the loop.
pub struct InputDevice {
    pub resource: Box<dyn KeySource>,
    pushback: VecDeque<KeyPress>,
}

impl Debug for InputDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDevice")
            .field("pushback", &self.pushback)
            .finish_non_exhaustive()
    }
}

impl InputDevice {
    pub fn new(resource: impl KeySource + 'static) -> Self {
        Self {
            resource: Box::new(resource),
            pushback: VecDeque::new(),
        }
    }

    /// Next key, pushback first.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying device fails.
    pub fn next_key(&mut self, timeout: Option<Duration>) -> io::Result<ReadKey> {
        if let Some(key) = self.pushback.pop_front() {
            return Ok(ReadKey::Key(key));
        }
        self.resource.read_key(timeout)
    }

    /// Put keys back so that the next reads return them, in the given order, before
    /// anything already queued.
    pub fn push_front_keys(&mut self, keys: &[KeyPress]) {
        for key in keys.iter().rev() {
            self.pushback.push_front(*key);
        }
    }

    /// Append keys after anything already queued.
    pub fn push_back_keys(&mut self, keys: &[KeyPress]) { self.pushback.extend(keys); }

    #[must_use]
    pub fn has_pending(&self) -> bool { !self.pushback.is_empty() }

    pub fn clear_pending(&mut self) { self.pushback.clear(); }

    #[must_use]
    pub fn terminal_width(&self) -> Option<u16> { self.resource.terminal_width() }
}
