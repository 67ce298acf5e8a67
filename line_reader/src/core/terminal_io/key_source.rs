// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io, time::Duration};

use super::KeyPress;

/// What a [`KeySource`] hands back from a single read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadKey {
    Key(KeyPress),
    /// The timeout elapsed before a key arrived.
    Timeout,
    /// The source is exhausted (stdin closed, script ran out).
    EndOfInput,
}

/// Anything that can produce key presses: a real terminal, or a scripted sequence in
/// tests.
pub trait KeySource: Send {
    /// Read the next key. `None` blocks until a key arrives or the source ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying device fails.
    fn read_key(&mut self, timeout: Option<Duration>) -> io::Result<ReadKey>;

    /// Terminal width in columns, if the source knows it.
    fn terminal_width(&self) -> Option<u16> { None }
}
