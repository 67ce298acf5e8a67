// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{count, repeat_count, wordchars};
use crate::{LineReader, WidgetResult, backward_word_start, forward_word_end, is_word_char};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CaseChange {
    Upper,
    Lower,
    /// First char of each word up, the rest down.
    Capitalize,
    Swap,
}

impl CaseChange {
    fn apply(self, chars: &[char], is_word: impl Fn(char) -> bool) -> String {
        let mut acc = String::with_capacity(chars.len());
        let mut in_word = false;
        for ch in chars.iter().copied() {
            let upper = match self {
                CaseChange::Upper => true,
                CaseChange::Lower => false,
                CaseChange::Capitalize => !in_word,
                CaseChange::Swap => !ch.is_uppercase(),
            };
            if upper {
                acc.extend(ch.to_uppercase());
            } else {
                acc.extend(ch.to_lowercase());
            }
            in_word = is_word(ch);
        }
        acc
    }
}

/// Change the case of the next `count` words and move past them. A negative count
/// changes the words before the cursor and leaves it where it is.
fn change_words(reader: &mut LineReader, change: CaseChange) -> WidgetResult {
    let backward = count(reader) < 0;
    let n = repeat_count(reader);
    let wordchars = wordchars(reader);
    let is_word = |ch: char| is_word_char(ch, &wordchars);
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    let mut pos = cursor;
    for _ in 0..n {
        pos = if backward {
            backward_word_start(buffer.chars(), pos, is_word)
        } else {
            forward_word_end(buffer.chars(), pos, is_word)
        };
    }
    let (start, end) = (cursor.min(pos), cursor.max(pos));
    if start == end {
        return Ok(false);
    }
    let changed = change.apply(&buffer.chars()[start..end], is_word);
    let changed_len = changed.chars().count();
    buffer.replace_range(start..end, &changed);
    if backward {
        buffer.set_cursor(start + changed_len);
    }
    Ok(true)
}

pub(super) fn capitalize_word(reader: &mut LineReader) -> WidgetResult {
    change_words(reader, CaseChange::Capitalize)
}

pub(super) fn up_case_word(reader: &mut LineReader) -> WidgetResult {
    change_words(reader, CaseChange::Upper)
}

pub(super) fn down_case_word(reader: &mut LineReader) -> WidgetResult {
    change_words(reader, CaseChange::Lower)
}

/// Swap the case of the chars in `range`, leaving the cursor where it was.
pub(super) fn swap_case_range(reader: &mut LineReader, range: std::ops::Range<usize>) {
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    let swapped = CaseChange::Swap.apply(&buffer.chars()[range.clone()], char::is_alphanumeric);
    buffer.replace_range(range, &swapped);
    buffer.set_cursor(cursor);
}

/// `~`: swap the case of `count` chars and move past them, staying on the line.
pub(super) fn vi_swap_case(reader: &mut LineReader) -> WidgetResult {
    let n = repeat_count(reader);
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let end = cursor.saturating_add(n).min(buffer.line_end(cursor));
    if end == cursor {
        return Ok(false);
    }
    swap_case_range(reader, cursor..end);
    reader.state.buffer.set_cursor(end);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{cursor, reader_with, run, text, vi_reader};
    use crate::WidgetName;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(WidgetName::CapitalizeWord, "Hello wORLD" ; "capitalize")]
    #[test_case(WidgetName::UpCaseWord, "HELLO wORLD" ; "upcase")]
    #[test_case(WidgetName::DownCaseWord, "hello wORLD" ; "downcase")]
    fn test_word_case(widget: WidgetName, expected: &str) {
        let mut reader = reader_with("hELLo wORLD", 0);
        assert!(run(&mut reader, widget));
        assert_eq!(text(&reader), expected);
        assert_eq!(cursor(&reader), 5);
    }

    #[test]
    fn test_negative_count_changes_previous_words_in_place() {
        let mut reader = reader_with("one two three", 13);
        reader.state.argument.set_count(-2);
        assert!(run(&mut reader, WidgetName::UpCaseWord));
        assert_eq!(text(&reader), "one TWO THREE");
        assert_eq!(cursor(&reader), 13);
    }

    #[test]
    fn test_case_change_at_end_fails() {
        let mut reader = reader_with("word  ", 6);
        assert!(!run(&mut reader, WidgetName::CapitalizeWord));
    }

    #[test]
    fn test_vi_swap_case() {
        let mut reader = vi_reader("aBc\nd", 0);
        reader.state.argument.set_count(10);
        assert!(run(&mut reader, WidgetName::ViSwapCase));
        assert_eq!(text(&reader), "AbC\nd");
        assert_eq!(cursor(&reader), 3);
    }
}
