// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io, time::Duration};

use crate::{Binding, InputDevice, KeyLookup, KeyMap, KeyPress, KeySeq, ReadKey, WidgetName,
            lookup_layers};

/// What the resolver settled on for the keys it consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// `keys` resolved to `binding`. Keys read past the match have been pushed back.
    Bound { binding: Binding, keys: KeySeq },
    /// Nothing matched and fallbacks were not allowed. The caller decides what to do
    /// with `keys` (the menu pushes them back and leaves).
    Unmatched { keys: KeySeq },
    /// The input ended before any key was read.
    EndOfInput,
}

/// Where to look and how long to wait.
#[derive(Clone, Copy, Debug)]
pub struct ResolverConfig<'a> {
    /// Keymaps to consult, highest priority first (`main`, then the mode's keymaps).
    pub layers: &'a [&'a KeyMap],
    /// Last resort bindings for keys that must never be dropped (Ctrl-C, Ctrl-D).
    pub safe: Option<&'a KeyMap>,
    /// How long an ambiguous match waits for a longer sequence to continue.
    pub ambiguous_timeout: Duration,
    /// Use the `unicode` / `.safe` / `nomatch` / `undefined-key` fallbacks.
    pub allow_fallback: bool,
}

/// Read keys until they resolve to a binding.
///
/// The longest bound sequence wins. When a bound sequence is also the start of longer
/// ones the resolver keeps reading, but only for up to `ambiguous_timeout` per key;
/// if the timeout elapses, or the next key leads nowhere, the shorter binding is
/// committed and any extra keys are pushed back into `input`.
///
/// # Errors
///
/// Returns an error if `input` fails.
pub fn resolve_binding(
    input: &mut InputDevice,
    config: &ResolverConfig<'_>,
) -> io::Result<Resolution> {
    let mut keys = KeySeq::new();
    // Exact match seen so far, and how many keys it covers.
    let mut pending: Option<(Binding, usize)> = None;

    loop {
        let timeout = pending.as_ref().map(|_| config.ambiguous_timeout);
        match input.next_key(timeout)? {
            ReadKey::Key(key) => keys.push(key),
            ReadKey::Timeout => {
                if let Some((binding, len)) = pending.take() {
                    return Ok(commit(input, keys, binding, len));
                }
                continue;
            }
            ReadKey::EndOfInput => {
                if let Some((binding, len)) = pending.take() {
                    return Ok(commit(input, keys, binding, len));
                }
                if keys.is_empty() {
                    return Ok(Resolution::EndOfInput);
                }
                return Ok(fallback(config, keys));
            }
        }

        match lookup_layers(config.layers, &keys) {
            KeyLookup::Exact(binding) => {
                return Ok(Resolution::Bound {
                    binding: binding.clone(),
                    keys,
                });
            }
            KeyLookup::Ambiguous(binding) => pending = Some((binding.clone(), keys.len())),
            KeyLookup::Prefix => {
                // A printable key that only starts longer bindings still self inserts
                // when the sequence goes nowhere.
                if keys.len() == 1
                    && let Some(binding) = unicode_fallback(config, &keys)
                {
                    pending = Some((binding, 1));
                }
            }
            KeyLookup::NoMatch => {
                if let Some((binding, len)) = pending.take() {
                    return Ok(commit(input, keys, binding, len));
                }
                return Ok(fallback(config, keys));
            }
        }
    }
}

fn commit(input: &mut InputDevice, mut keys: KeySeq, binding: Binding, len: usize) -> Resolution {
    input.push_front_keys(&keys[len..]);
    keys.truncate(len);
    tracing::trace!(message = "ambiguous binding committed", ?binding);
    Resolution::Bound { binding, keys }
}

fn fallback(config: &ResolverConfig<'_>, keys: KeySeq) -> Resolution {
    if !config.allow_fallback {
        return Resolution::Unmatched { keys };
    }

    let Some(last) = keys.last().copied() else {
        return Resolution::Unmatched { keys };
    };

    if keys.len() == 1 {
        if let Some(binding) = unicode_fallback(config, &keys) {
            return Resolution::Bound { binding, keys };
        }
        if let Some(binding) = config.safe.and_then(|safe| safe.bound(&keys)) {
            return Resolution::Bound {
                binding: binding.clone(),
                keys,
            };
        }
        if let Some(binding) = config.layers.iter().find_map(|layer| layer.nomatch.clone()) {
            return Resolution::Bound { binding, keys };
        }
    } else if let Some(binding) = config.safe.and_then(|safe| safe.bound(&[last])) {
        // A broken off sequence ending in Ctrl-C still interrupts.
        return Resolution::Bound {
            binding: binding.clone(),
            keys: KeySeq::from_slice(&[last]),
        };
    }

    tracing::debug!(message = "unbound key sequence", keys = %crate::key_seq_to_string(&keys));
    Resolution::Bound {
        binding: WidgetName::UndefinedKey.into(),
        keys,
    }
}

fn unicode_fallback(config: &ResolverConfig<'_>, keys: &[KeyPress]) -> Option<Binding> {
    if !config.allow_fallback || keys.first()?.printable_char().is_none() {
        return None;
    }
    config.layers.iter().find_map(|layer| layer.unicode.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScriptedInput, ScriptedKeySource, parse_key_seq};
    use pretty_assertions::assert_eq;

    fn emacs_like() -> KeyMap {
        let mut keymap = KeyMap::new();
        keymap.bind_str("^X", WidgetName::Beep.into()).unwrap();
        keymap.bind_str("^X^U", WidgetName::Undo.into()).unwrap();
        keymap.bind_str("^A", WidgetName::BeginningOfLine.into()).unwrap();
        keymap.unicode = Some(WidgetName::SelfInsert.into());
        keymap
    }

    fn safe() -> KeyMap {
        let mut keymap = KeyMap::new();
        keymap.bind_str("^C", WidgetName::Abort.into()).unwrap();
        keymap
    }

    fn resolve(script: Vec<ScriptedInput>, allow_fallback: bool) -> (Resolution, InputDevice) {
        let keymap = emacs_like();
        let safe = safe();
        let layers = [&keymap];
        let config = ResolverConfig {
            layers: &layers,
            safe: Some(&safe),
            ambiguous_timeout: Duration::from_millis(5),
            allow_fallback,
        };
        let mut input = InputDevice::new(ScriptedKeySource::new(script));
        let resolution = resolve_binding(&mut input, &config).unwrap();
        (resolution, input)
    }

    fn keys(notation: &str) -> Vec<ScriptedInput> {
        parse_key_seq(notation)
            .unwrap()
            .into_iter()
            .map(ScriptedInput::Key)
            .collect()
    }

    #[test]
    fn test_exact_match_resolves_immediately() {
        let (resolution, _) = resolve(keys("^A"), true);
        assert_eq!(
            resolution,
            Resolution::Bound {
                binding: WidgetName::BeginningOfLine.into(),
                keys: parse_key_seq("^A").unwrap(),
            }
        );
    }

    #[test]
    fn test_ambiguous_waits_for_longer_sequence() {
        let (resolution, _) = resolve(keys("^X^U"), true);
        assert_eq!(
            resolution,
            Resolution::Bound {
                binding: WidgetName::Undo.into(),
                keys: parse_key_seq("^X^U").unwrap(),
            }
        );
    }

    #[test]
    fn test_ambiguous_commits_on_timeout() {
        let mut script = keys("^X");
        script.push(ScriptedInput::Pause);
        script.extend(keys("^U"));
        let (resolution, mut input) = resolve(script, true);
        assert_eq!(
            resolution,
            Resolution::Bound {
                binding: WidgetName::Beep.into(),
                keys: parse_key_seq("^X").unwrap(),
            }
        );
        assert_eq!(input.next_key(None).unwrap(), ReadKey::Key(KeyPress::ctrl('u')));
    }

    #[test]
    fn test_ambiguous_commits_and_pushes_back_on_dead_end() {
        let (resolution, mut input) = resolve(keys("^Xq"), true);
        assert_eq!(
            resolution,
            Resolution::Bound {
                binding: WidgetName::Beep.into(),
                keys: parse_key_seq("^X").unwrap(),
            }
        );
        assert!(input.has_pending());
        assert_eq!(input.next_key(None).unwrap(), ReadKey::Key(KeyPress::ch('q')));
    }

    #[test]
    fn test_fallbacks() {
        let (resolution, _) = resolve(keys("z"), true);
        assert_eq!(
            resolution,
            Resolution::Bound {
                binding: WidgetName::SelfInsert.into(),
                keys: parse_key_seq("z").unwrap(),
            }
        );

        let (resolution, _) = resolve(keys("^C"), true);
        assert_eq!(
            resolution,
            Resolution::Bound {
                binding: WidgetName::Abort.into(),
                keys: parse_key_seq("^C").unwrap(),
            }
        );

        let (resolution, _) = resolve(keys("^Q"), true);
        assert_eq!(
            resolution,
            Resolution::Bound {
                binding: WidgetName::UndefinedKey.into(),
                keys: parse_key_seq("^Q").unwrap(),
            }
        );

        let (resolution, _) = resolve(keys("^Q"), false);
        assert_eq!(
            resolution,
            Resolution::Unmatched {
                keys: parse_key_seq("^Q").unwrap()
            }
        );
    }

    #[test]
    fn test_printable_prefix_self_inserts_on_dead_end() {
        let mut keymap = emacs_like();
        keymap.bind_str("jk", WidgetName::ViCmdMode.into()).unwrap();
        let layers = [&keymap];
        let config = ResolverConfig {
            layers: &layers,
            safe: None,
            ambiguous_timeout: Duration::from_millis(5),
            allow_fallback: true,
        };

        let mut input = InputDevice::new(ScriptedKeySource::new(keys("ja")));
        assert_eq!(
            resolve_binding(&mut input, &config).unwrap(),
            Resolution::Bound {
                binding: WidgetName::SelfInsert.into(),
                keys: parse_key_seq("j").unwrap(),
            }
        );
        assert_eq!(input.next_key(None).unwrap(), ReadKey::Key(KeyPress::ch('a')));

        let mut input = InputDevice::new(ScriptedKeySource::new(keys("jk")));
        assert_eq!(
            resolve_binding(&mut input, &config).unwrap(),
            Resolution::Bound {
                binding: WidgetName::ViCmdMode.into(),
                keys: parse_key_seq("jk").unwrap(),
            }
        );
    }

    #[test]
    fn test_interrupt_mid_sequence() {
        // The dead end commits `^X`, then `^C` is read again on its own.
        let (resolution, mut input) = resolve(keys("^X^C"), true);
        assert_eq!(
            resolution,
            Resolution::Bound {
                binding: WidgetName::Beep.into(),
                keys: parse_key_seq("^X").unwrap(),
            }
        );
        let keymap = emacs_like();
        let safe = safe();
        let layers = [&keymap];
        let config = ResolverConfig {
            layers: &layers,
            safe: Some(&safe),
            ambiguous_timeout: Duration::from_millis(5),
            allow_fallback: true,
        };
        let resolution = resolve_binding(&mut input, &config).unwrap();
        assert_eq!(
            resolution,
            Resolution::Bound {
                binding: WidgetName::Abort.into(),
                keys: parse_key_seq("^C").unwrap(),
            }
        );
    }

    #[test]
    fn test_end_of_input() {
        let (resolution, _) = resolve(vec![], true);
        assert_eq!(resolution, Resolution::EndOfInput);
    }
}
