// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use miette::Diagnostic;
use thiserror::Error;

use crate::History;

#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ExpandError {
    #[error("{0}: event not found")]
    #[diagnostic(code(line_reader::expander::event_not_found))]
    EventNotFound(String),

    #[error("substitution failed")]
    #[diagnostic(code(line_reader::expander::substitution))]
    SubstitutionFailed,
}

/// Expands history references in a line before it is accepted.
pub trait Expander: Debug + Send {
    /// # Errors
    ///
    /// Returns an error if a reference names no entry.
    fn expand_history(&self, history: &dyn History, line: &str) -> Result<String, ExpandError>;

    /// Expand a single word for `expand-word`. The default leaves it alone.
    fn expand_var(&self, word: &str) -> String { word.to_string() }
}

/// Shell style event designators:
///
/// | Reference   | Expands to                                   |
/// |-------------|----------------------------------------------|
/// | `!!`        | The previous line                            |
/// | `!$`        | Last word of the previous line               |
/// | `!n`        | Entry number `n`, counting from 1            |
/// | `!-n`       | The `n`th previous line                      |
/// | `!?text`    | Newest line containing `text`                |
/// | `!prefix`   | Newest line starting with `prefix`           |
/// | `^old^new`  | Previous line with `old` replaced by `new` (start of line only) |
///
/// `\!` is a literal `!`, and so is a `!` followed by a blank, `=`, `(`, or the end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultExpander;

impl Expander for DefaultExpander {
    fn expand_history(&self, history: &dyn History, line: &str) -> Result<String, ExpandError> {
        if let Some(rest) = line.strip_prefix('^') {
            return quick_substitution(history, rest);
        }

        let chars: Vec<char> = line.chars().collect();
        let mut acc = String::with_capacity(line.len());
        let mut pos = 0;
        while pos < chars.len() {
            let ch = chars[pos];
            if ch == '\\' && chars.get(pos + 1) == Some(&'!') {
                acc.push('!');
                pos += 2;
                continue;
            }
            if ch != '!' {
                acc.push(ch);
                pos += 1;
                continue;
            }
            let (expansion, consumed) = expand_event(history, &chars[pos + 1..])?;
            acc.push_str(&expansion);
            pos += 1 + consumed;
        }
        Ok(acc)
    }
}

fn last_entry(history: &dyn History) -> Option<&str> {
    history.len().checked_sub(1).and_then(|index| history.get(index))
}

/// Expand the designator after a `!`. Returns the text and how many chars of `rest`
/// it used.
fn expand_event(history: &dyn History, rest: &[char]) -> Result<(String, usize), ExpandError> {
    let not_found = |reference: String| ExpandError::EventNotFound(format!("!{reference}"));
    let Some(&first) = rest.first() else {
        return Ok(("!".to_string(), 0));
    };

    match first {
        '!' => last_entry(history)
            .map(|entry| (entry.to_string(), 1))
            .ok_or_else(|| not_found("!".to_string())),
        '$' => last_entry(history)
            .map(|entry| {
                let word = entry.split_whitespace().last().unwrap_or_default();
                (word.to_string(), 1)
            })
            .ok_or_else(|| not_found("$".to_string())),
        ' ' | '\t' | '\n' | '=' | '(' => Ok(("!".to_string(), 0)),
        '-' | '0'..='9' => {
            let negative = first == '-';
            let digits: String = rest[usize::from(negative)..]
                .iter()
                .take_while(|ch| ch.is_ascii_digit())
                .collect();
            let consumed = usize::from(negative) + digits.len();
            let reference: String = rest[..consumed].iter().collect();
            let number: usize = digits.parse().map_err(|_| not_found(reference.clone()))?;
            let index = if negative {
                history.len().checked_sub(number)
            } else {
                number.checked_sub(1)
            };
            index
                .and_then(|index| history.get(index))
                .map(|entry| (entry.to_string(), consumed))
                .ok_or_else(|| not_found(reference))
        }
        '?' => {
            let text: String = rest[1..].iter().take_while(|ch| **ch != '?' && **ch != '\n').collect();
            let mut consumed = 1 + text.chars().count();
            if rest.get(consumed) == Some(&'?') {
                consumed += 1;
            }
            (0..history.len())
                .rev()
                .filter_map(|index| history.get(index))
                .find(|entry| entry.contains(&text))
                .map(|entry| (entry.to_string(), consumed))
                .ok_or_else(|| not_found(format!("?{text}")))
        }
        _ => {
            let prefix: String = rest
                .iter()
                .take_while(|ch| !ch.is_whitespace() && !matches!(ch, '!' | '"' | '\'' | ';'))
                .collect();
            (0..history.len())
                .rev()
                .filter_map(|index| history.get(index))
                .find(|entry| entry.starts_with(&prefix))
                .map(|entry| (entry.to_string(), prefix.chars().count()))
                .ok_or_else(|| not_found(prefix))
        }
    }
}

/// `^old^new[^]rest`: previous line with the first `old` replaced.
fn quick_substitution(history: &dyn History, rest: &str) -> Result<String, ExpandError> {
    let mut parts = rest.splitn(3, '^');
    let old = parts.next().unwrap_or_default();
    let new = parts.next().unwrap_or_default();
    let tail = parts.next().unwrap_or_default();
    let previous = last_entry(history).ok_or_else(|| ExpandError::EventNotFound("^".to_string()))?;
    if old.is_empty() || !previous.contains(old) {
        return Err(ExpandError::SubstitutionFailed);
    }
    Ok(format!("{}{tail}", previous.replacen(old, new, 1)))
}
