// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key binding notation.
//!
//! | Notation                     | Key                                   |
//! |------------------------------|---------------------------------------|
//! | `^X`                         | Ctrl + X (`^?` is Backspace, `^[` Esc) |
//! | `\eX`, `M-X`, `\M-X`         | Alt + X                               |
//! | `\e` at the end              | Esc                                   |
//! | `C-X`, `\C-X`                | Ctrl + X                              |
//! | `<Up>`, `<F5>`, `<C-Left>`   | Named keys, optionally with `C-`/`S-`/`M-` |
//! | `\\`, `\^`, `\<`             | The literal char                      |
//! | `\n`, `\r`, `\t`             | Ctrl-J, Enter, Tab                    |
//! | anything else                | That char                             |

use miette::Diagnostic;
use nom::{IResult, Parser,
          branch::alt,
          bytes::complete::{tag, take_while1},
          character::complete::{anychar, char},
          combinator::{map, map_opt, opt},
          sequence::{delimited, preceded}};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{FunctionKey, Key, KeyPress, ModifierKeysMask, SpecialKey};

/// Most bindings are one or two keys long.
pub type KeySeq = SmallVec<[KeyPress; 4]>;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum KeySeqParseError {
    #[error("empty key sequence")]
    #[diagnostic(code(line_reader::key_seq::empty))]
    Empty,

    #[error("can't parse key sequence {notation:?} at {rest:?}")]
    #[diagnostic(code(line_reader::key_seq::invalid))]
    Invalid { notation: String, rest: String },
}

/// Parse binding notation into a key sequence.
///
/// # Errors
///
/// Returns [`KeySeqParseError::Empty`] for an empty string.
pub fn parse_key_seq(notation: &str) -> Result<KeySeq, KeySeqParseError> {
    if notation.is_empty() {
        return Err(KeySeqParseError::Empty);
    }
    let mut keys = KeySeq::new();
    let mut rest = notation;
    while !rest.is_empty() {
        match parse_key(rest) {
            Ok((remaining, key)) => {
                keys.push(key);
                rest = remaining;
            }
            Err(_) => {
                return Err(KeySeqParseError::Invalid {
                    notation: notation.to_string(),
                    rest: rest.to_string(),
                });
            }
        }
    }
    Ok(keys)
}

/// Render a key sequence in the notation [`parse_key_seq`] reads.
#[must_use]
pub fn key_seq_to_string(keys: &[KeyPress]) -> String {
    keys.iter().map(ToString::to_string).collect()
}

fn parse_key(input: &str) -> IResult<&str, KeyPress> {
    alt((
        parse_escape_prefix,
        parse_meta_dash,
        parse_ctrl_dash,
        parse_caret,
        parse_named_key,
        parse_backslash_escape,
        map(anychar, KeyPress::ch),
    ))
    .parse(input)
}

fn with_alt(key: KeyPress) -> KeyPress { KeyPress::new(key.key(), key.mask().with_alt()) }

/// `\e` followed by a key is Alt + key; a trailing `\e` is Esc.
fn parse_escape_prefix(input: &str) -> IResult<&str, KeyPress> {
    map(
        preceded(alt((tag("\\e"), tag("\\E"))), opt(parse_key)),
        |key| match key {
            Some(key) => with_alt(key),
            None => KeyPress::special(SpecialKey::Esc),
        },
    )
    .parse(input)
}

fn parse_meta_dash(input: &str) -> IResult<&str, KeyPress> {
    map(preceded(alt((tag("\\M-"), tag("M-"))), parse_key), with_alt).parse(input)
}

fn parse_ctrl_dash(input: &str) -> IResult<&str, KeyPress> {
    map(preceded(alt((tag("\\C-"), tag("C-"))), anychar), KeyPress::ctrl).parse(input)
}

fn parse_caret(input: &str) -> IResult<&str, KeyPress> {
    map(preceded(char('^'), anychar), KeyPress::ctrl).parse(input)
}

fn parse_named_key(input: &str) -> IResult<&str, KeyPress> {
    map_opt(
        delimited(char('<'), take_while1(|ch: char| ch != '>' && ch != '<'), char('>')),
        named_key,
    )
    .parse(input)
}

fn parse_backslash_escape(input: &str) -> IResult<&str, KeyPress> {
    map(preceded(char('\\'), anychar), |ch| match ch {
        'n' => KeyPress::ctrl('j'),
        'r' => KeyPress::special(SpecialKey::Enter),
        't' => KeyPress::special(SpecialKey::Tab),
        other => KeyPress::ch(other),
    })
    .parse(input)
}

fn named_key(name: &str) -> Option<KeyPress> {
    let mut mask = ModifierKeysMask::new();
    let mut rest = name;
    loop {
        if let Some(stripped) = rest.strip_prefix("C-") {
            mask = mask.with_ctrl();
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("S-") {
            mask = mask.with_shift();
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("M-") {
            mask = mask.with_alt();
            rest = stripped;
        } else {
            break;
        }
    }

    let key = match rest.to_ascii_lowercase().as_str() {
        "up" => Key::SpecialKey(SpecialKey::Up),
        "down" => Key::SpecialKey(SpecialKey::Down),
        "left" => Key::SpecialKey(SpecialKey::Left),
        "right" => Key::SpecialKey(SpecialKey::Right),
        "home" => Key::SpecialKey(SpecialKey::Home),
        "end" => Key::SpecialKey(SpecialKey::End),
        "pageup" | "pgup" => Key::SpecialKey(SpecialKey::PageUp),
        "pagedown" | "pgdn" => Key::SpecialKey(SpecialKey::PageDown),
        "del" | "delete" => Key::SpecialKey(SpecialKey::Delete),
        "ins" | "insert" => Key::SpecialKey(SpecialKey::Insert),
        "bs" | "backspace" => Key::SpecialKey(SpecialKey::Backspace),
        "enter" | "cr" | "return" => Key::SpecialKey(SpecialKey::Enter),
        "tab" => Key::SpecialKey(SpecialKey::Tab),
        "backtab" => Key::SpecialKey(SpecialKey::BackTab),
        "esc" | "escape" => Key::SpecialKey(SpecialKey::Esc),
        "space" => Key::Character(' '),
        lower => {
            let number = lower.strip_prefix('f')?.parse::<u8>().ok()?;
            Key::FunctionKey(FunctionKey::from_number(number)?)
        }
    };
    Some(KeyPress::new(key, mask))
}
