// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque, io, time::Duration};

use crate::{KeyPress, KeySource, ReadKey};

/// One step of a [`ScriptedKeySource`] script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptedInput {
    Key(KeyPress),
    /// The user stops typing. A read with a timeout returns [`ReadKey::Timeout`]; a
    /// blocking read skips over it.
    Pause,
}

/// Replays a fixed sequence of keys, then reports end of input. Reads never sleep, so
/// ambiguous-prefix timeouts are modeled with [`ScriptedInput::Pause`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedKeySource {
    script: VecDeque<ScriptedInput>,
    width: Option<u16>,
}

impl ScriptedKeySource {
    #[must_use]
    pub fn new(script: Vec<ScriptedInput>) -> Self {
        Self {
            script: script.into(),
            width: None,
        }
    }

    /// Each char of `text` as a key press. Control chars become ctrl keys.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new(text.chars().map(|ch| ScriptedInput::Key(KeyPress::ch(ch))).collect())
    }

    #[must_use]
    pub fn from_keys(keys: &[KeyPress]) -> Self {
        Self::new(keys.iter().copied().map(ScriptedInput::Key).collect())
    }

    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn push_text(&mut self, text: &str) {
        self.script
            .extend(text.chars().map(|ch| ScriptedInput::Key(KeyPress::ch(ch))));
    }

    pub fn push_key(&mut self, key: KeyPress) { self.script.push_back(ScriptedInput::Key(key)); }

    pub fn push_pause(&mut self) { self.script.push_back(ScriptedInput::Pause); }

    #[must_use]
    pub fn remaining(&self) -> usize { self.script.len() }
}

impl KeySource for ScriptedKeySource {
    fn read_key(&mut self, timeout: Option<Duration>) -> io::Result<ReadKey> {
        while let Some(step) = self.script.pop_front() {
            match step {
                ScriptedInput::Key(key) => return Ok(ReadKey::Key(key)),
                ScriptedInput::Pause if timeout.is_some() => return Ok(ReadKey::Timeout),
                ScriptedInput::Pause => continue,
            }
        }
        Ok(ReadKey::EndOfInput)
    }

    fn terminal_width(&self) -> Option<u16> { self.width }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pause_only_matters_for_timed_reads() -> io::Result<()> {
        let mut source = ScriptedKeySource::from_text("a");
        source.push_pause();
        source.push_text("b");
        source.push_pause();
        source.push_text("c");

        assert_eq!(source.read_key(None)?, ReadKey::Key(KeyPress::ch('a')));
        assert_eq!(source.read_key(None)?, ReadKey::Key(KeyPress::ch('b')));
        let timeout = Some(Duration::from_millis(10));
        assert_eq!(source.read_key(timeout)?, ReadKey::Timeout);
        assert_eq!(source.read_key(timeout)?, ReadKey::Key(KeyPress::ch('c')));
        assert_eq!(source.read_key(timeout)?, ReadKey::EndOfInput);
        Ok(())
    }
}
