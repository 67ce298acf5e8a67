// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::RingBufferHeap;

pub const KILL_RING_CAPACITY: usize = 60;

/// Which side of the cursor the killed text came from. Decides how consecutive kills
/// are joined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillDirection {
    Forward,
    Backward,
}

/// Killed text, newest last. `yank` inserts the newest entry, `yank-pop` walks toward
/// older ones and wraps around.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KillRing {
    ring: RingBufferHeap<String, KILL_RING_CAPACITY>,
    /// Distance from the newest entry of the last yank.
    yank_offset: usize,
}

impl KillRing {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Save `text`. When `join` is set (the previous widget was a kill too) the text is
    /// merged into the newest entry instead, appended for forward kills and prepended
    /// for backward ones.
    pub fn kill(&mut self, text: &str, direction: KillDirection, join: bool) {
        if text.is_empty() {
            return;
        }
        if join && let Some(newest) = self.ring.newest_mut() {
            match direction {
                KillDirection::Forward => newest.push_str(text),
                KillDirection::Backward => newest.insert_str(0, text),
            }
        } else {
            self.ring.add(text.to_string());
        }
        self.yank_offset = 0;
    }

    /// Save `text` as a new entry without joining.
    pub fn add(&mut self, text: &str) { self.kill(text, KillDirection::Forward, false); }

    /// The newest entry.
    pub fn yank(&mut self) -> Option<&str> {
        self.yank_offset = 0;
        self.ring.newest().map(String::as_str)
    }

    /// The entry before the one yanked last, wrapping to the newest after the oldest.
    pub fn yank_pop(&mut self) -> Option<&str> {
        if self.ring.is_empty() {
            return None;
        }
        self.yank_offset = (self.yank_offset + 1) % self.ring.len();
        self.ring.get_from_newest(self.yank_offset).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize { self.ring.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.ring.is_empty() }
}
