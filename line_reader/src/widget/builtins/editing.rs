// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use super::{count, misc, motion, repeat_count, vi_operator, wordchars};
use crate::{DEFAULT_COMMENT_BEGIN, DEFAULT_REMOVE_SUFFIX_CHARS, EditMode, Key, KeyPress,
            LineReader, LineReaderOption, SpecialKey, Unwind, ViOperator, WidgetResult,
            backward_word_start, forward_word_end, is_word_char, variable_names};

/// How long the cursor rests on the matching open bracket.
const BLINK_DURATION: Duration = Duration::from_millis(500);

/// Insert `ch` `count` times. A suffix left by completion goes away first when `ch` is
/// one of `REMOVE_SUFFIX_CHARS`.
fn insert_typed(reader: &mut LineReader, ch: char) -> WidgetResult {
    remove_completion_suffix(reader, ch);
    let n = repeat_count(reader);
    for _ in 0..n {
        reader.state.buffer.insert_char(ch);
    }
    Ok(true)
}

fn remove_completion_suffix(reader: &mut LineReader, typed: char) {
    let Some(suffix) = reader.state.completion_suffix.take() else {
        return;
    };
    let remove_chars = reader
        .variables
        .get_string(variable_names::REMOVE_SUFFIX_CHARS, DEFAULT_REMOVE_SUFFIX_CHARS);
    if !remove_chars.contains(typed) {
        return;
    }
    let len = suffix.chars().count();
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    if cursor >= len && buffer.substring(cursor - len..cursor) == suffix {
        buffer.backspace(len);
    }
}

pub(super) fn self_insert(reader: &mut LineReader) -> WidgetResult {
    match reader.state.keys.last().and_then(KeyPress::insertable_char) {
        Some(ch) => insert_typed(reader, ch),
        None => Ok(false),
    }
}

/// Insert the char of a meta key without its meta bit.
pub(super) fn self_insert_unmeta(reader: &mut LineReader) -> WidgetResult {
    match reader
        .state
        .keys
        .last()
        .and_then(|key| key.without_alt().insertable_char())
    {
        Some(ch) => insert_typed(reader, ch),
        None => Ok(false),
    }
}

/// Expand history references in the line, then insert a space.
pub(super) fn magic_space(reader: &mut LineReader) -> WidgetResult {
    if !reader.is_set(LineReaderOption::DisableEventExpansion) {
        let text = reader.state.buffer.text();
        if let Ok(expanded) = reader.expander.expand_history(reader.history.as_ref(), &text)
            && expanded != text
        {
            reader.state.buffer.replace_all(&expanded);
        }
    }
    insert_typed(reader, ' ')
}

/// Insert `close`, and with `blink-matching-paren` show where its match is until the
/// next key or half a second passes.
pub(super) fn insert_close(reader: &mut LineReader, close: char) -> WidgetResult {
    insert_typed(reader, close)?;
    if reader
        .variables
        .get_bool(variable_names::BLINK_MATCHING_PAREN, false)
    {
        blink_matching_bracket(reader)?;
    }
    Ok(true)
}

fn blink_matching_bracket(reader: &mut LineReader) -> Result<(), Unwind> {
    let cursor = reader.state.buffer.cursor();
    let Some(open) = cursor
        .checked_sub(1)
        .and_then(|close| motion::matching_bracket(reader.state.buffer.chars(), close))
    else {
        return Ok(());
    };
    reader.state.buffer.set_cursor(open);
    reader.redisplay()?;
    reader.peek_key(BLINK_DURATION)?;
    reader.state.buffer.set_cursor(cursor);
    Ok(())
}

pub(super) fn backward_delete_char(reader: &mut LineReader) -> WidgetResult {
    if count(reader) < 0 {
        return Ok(!reader.state.buffer.delete(repeat_count(reader)).is_empty());
    }
    Ok(!reader
        .state
        .buffer
        .backspace(repeat_count(reader))
        .is_empty())
}

pub(super) fn delete_char(reader: &mut LineReader) -> WidgetResult {
    if count(reader) < 0 {
        return Ok(!reader
            .state
            .buffer
            .backspace(repeat_count(reader))
            .is_empty());
    }
    Ok(!reader.state.buffer.delete(repeat_count(reader)).is_empty())
}

/// The span from the cursor to the end (`forward`) or start of the `count`th word.
pub(super) fn word_span(reader: &LineReader, forward: bool) -> (usize, usize) {
    let forward = forward == (count(reader) >= 0);
    let n = repeat_count(reader);
    let wordchars = wordchars(reader);
    let is_word = |ch: char| is_word_char(ch, &wordchars);
    let chars = reader.state.buffer.chars();
    let cursor = reader.state.buffer.cursor();
    let mut pos = cursor;
    for _ in 0..n {
        pos = if forward {
            forward_word_end(chars, pos, is_word)
        } else {
            backward_word_start(chars, pos, is_word)
        };
    }
    (cursor.min(pos), cursor.max(pos))
}

pub(super) fn backward_delete_word(reader: &mut LineReader) -> WidgetResult {
    let (start, end) = word_span(reader, false);
    Ok(!reader.state.buffer.delete_range(start, end).is_empty())
}

pub(super) fn delete_word(reader: &mut LineReader) -> WidgetResult {
    let (start, end) = word_span(reader, true);
    Ok(!reader.state.buffer.delete_range(start, end).is_empty())
}

/// `X` in command mode (into the register), backspace in insert mode. Neither joins
/// lines.
pub(super) fn vi_backward_delete_char(reader: &mut LineReader) -> WidgetResult {
    let n = repeat_count(reader);
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let start = cursor.saturating_sub(n).max(buffer.line_start(cursor));
    if start == cursor {
        return Ok(false);
    }
    if reader.state.mode.mode() == EditMode::ViCommand {
        return vi_operator::apply_operator(reader, ViOperator::Delete, start..cursor, false);
    }
    reader.state.buffer.delete_range(start, cursor);
    Ok(true)
}

/// `x`: up to `count` chars under and after the cursor, not past the line end.
pub(super) fn vi_delete_char(reader: &mut LineReader) -> WidgetResult {
    let n = repeat_count(reader);
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let end = cursor.saturating_add(n).min(buffer.line_end(cursor));
    if end == cursor {
        return Ok(false);
    }
    vi_operator::apply_operator(reader, ViOperator::Delete, cursor..end, false)
}

/// Swap the char before the cursor with the one under it and step forward. At the end
/// of a line the last two chars are swapped.
pub(super) fn transpose_chars(reader: &mut LineReader) -> WidgetResult {
    let n = repeat_count(reader);
    let buffer = &mut reader.state.buffer;
    for _ in 0..n {
        let cursor = buffer.cursor();
        let line_start = buffer.line_start(cursor);
        let at = if cursor >= buffer.line_end(cursor) {
            cursor.saturating_sub(1)
        } else {
            cursor
        };
        if at <= line_start {
            return Ok(false);
        }
        let (Some(before), Some(after)) = (buffer.char_at(at - 1), buffer.char_at(at)) else {
            return Ok(false);
        };
        buffer.replace_range(at - 1..at + 1, &format!("{after}{before}"));
    }
    Ok(true)
}

/// Swap the word before the cursor with the one under or after it.
pub(super) fn transpose_words(reader: &mut LineReader) -> WidgetResult {
    let wordchars = wordchars(reader);
    let is_word = |ch: char| is_word_char(ch, &wordchars);
    let buffer = &mut reader.state.buffer;
    let chars = buffer.chars().to_vec();

    let second_end = forward_word_end(&chars, buffer.cursor(), is_word);
    let second_start = backward_word_start(&chars, second_end, is_word);
    let second_end = second_start
        + chars[second_start..]
            .iter()
            .take_while(|ch| is_word(**ch))
            .count();
    let mut first_end = second_start;
    while first_end > 0 && !is_word(chars[first_end - 1]) {
        first_end -= 1;
    }
    let first_start = backward_word_start(&chars, first_end, is_word);
    if first_start == first_end || second_start == second_end {
        return Ok(false);
    }

    let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();
    let swapped = format!(
        "{}{}{}",
        slice(second_start, second_end),
        slice(first_end, second_start),
        slice(first_start, first_end)
    );
    buffer.replace_range(first_start..second_end, &swapped);
    Ok(true)
}

pub(super) fn overwrite_mode(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    buffer.set_overwrite(!buffer.is_overwrite());
    Ok(true)
}

/// The char a key sends on a plain terminal: control codes for ctrl letters, CR for
/// Enter, and so on.
pub(super) fn raw_char(key: KeyPress) -> Option<char> {
    if let Some(ch) = key.printable_char() {
        return Some(ch);
    }
    match key.key() {
        Key::Character(ch) if key.is_ctrl() && ch.is_ascii_lowercase() => {
            char::from_u32(u32::from(ch) - u32::from('a') + 1)
        }
        Key::Character('@' | ' ') if key.is_ctrl() => Some('\0'),
        Key::SpecialKey(SpecialKey::Enter) => Some('\r'),
        Key::SpecialKey(SpecialKey::Tab) => Some('\t'),
        Key::SpecialKey(SpecialKey::Esc) => Some('\x1b'),
        Key::SpecialKey(SpecialKey::Backspace) => Some('\x7f'),
        _ => None,
    }
}

/// Insert the next key verbatim.
pub(super) fn quoted_insert(reader: &mut LineReader) -> WidgetResult {
    let key = reader.read_key_argument()?;
    let Some(ch) = raw_char(key) else {
        return Ok(false);
    };
    let n = repeat_count(reader);
    for _ in 0..n {
        reader.state.buffer.insert_char(ch);
    }
    Ok(true)
}

/// Comment out every line with `comment-begin` and accept. With `toggle` (vi), or with
/// a numeric argument, an already commented buffer is uncommented instead.
pub(super) fn insert_comment(reader: &mut LineReader, toggle: bool) -> WidgetResult {
    let comment = reader
        .variables
        .get_string(variable_names::COMMENT_BEGIN, DEFAULT_COMMENT_BEGIN);
    let text = reader.state.buffer.text();
    let uncomment = (toggle || reader.state.argument.is_active()) && text.starts_with(&comment);
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| match (uncomment, line.strip_prefix(comment.as_str())) {
            (true, Some(rest)) => rest.to_string(),
            (true, None) => line.to_string(),
            (false, _) => format!("{comment}{line}"),
        })
        .collect();
    reader.state.buffer.replace_all(&lines.join("\n"));
    misc::accept_line(reader)
}

/// Insert the blank delimited word left of the cursor again.
pub(super) fn copy_prev_word(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    let chars = buffer.chars();
    let mut end = buffer.cursor();
    while end > 0 && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    let mut start = end;
    while start > 0 && !chars[start - 1].is_whitespace() {
        start -= 1;
    }
    if start == end {
        return Ok(false);
    }
    let word = buffer.substring(start..end);
    buffer.insert(&word);
    Ok(true)
}

pub(super) fn undo(reader: &mut LineReader) -> WidgetResult {
    let current = reader.state.buffer.snapshot();
    match reader.state.undo.undo(current) {
        Some(snapshot) => {
            reader.state.buffer.restore(&snapshot);
            Ok(true)
        }
        None => Ok(false),
    }
}

pub(super) fn redo(reader: &mut LineReader) -> WidgetResult {
    let current = reader.state.buffer.snapshot();
    match reader.state.undo.redo(current) {
        Some(snapshot) => {
            reader.state.buffer.restore(&snapshot);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// End the current run of typed chars, so the next one starts a new undo step.
pub(super) fn split_undo(reader: &mut LineReader) -> WidgetResult {
    reader.state.undo.split();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{cursor, reader_with, reader_with_keys, run, text, typed,
                                     vi_reader};
    use crate::{KeyPress, WidgetName, variable_names};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_self_insert_repeats_by_count() {
        let mut reader = reader_with("", 0);
        typed(&mut reader, KeyPress::ch('z'));
        reader.state.argument.set_count(3);
        assert!(run(&mut reader, WidgetName::SelfInsert));
        assert_eq!(text(&reader), "zzz");

        typed(&mut reader, KeyPress::ctrl('x'));
        assert!(!run(&mut reader, WidgetName::SelfInsert));
    }

    #[test]
    fn test_self_insert_unmeta() {
        let mut reader = reader_with("", 0);
        typed(&mut reader, KeyPress::alt('q'));
        assert!(run(&mut reader, WidgetName::SelfInsertUnmeta));
        assert_eq!(text(&reader), "q");
    }

    #[test]
    fn test_completion_suffix_is_removed_by_separator() {
        let mut reader = reader_with("cd src/", 7);
        reader.state.completion_suffix = Some("/".to_string());
        typed(&mut reader, KeyPress::ch(' '));
        run(&mut reader, WidgetName::SelfInsert);
        assert_eq!(text(&reader), "cd src ");

        let mut reader = reader_with("cd src/", 7);
        reader.state.completion_suffix = Some("/".to_string());
        typed(&mut reader, KeyPress::ch('m'));
        run(&mut reader, WidgetName::SelfInsert);
        assert_eq!(text(&reader), "cd src/m");
    }

    #[test]
    fn test_magic_space_expands_history() {
        let mut reader = reader_with("echo !!", 7);
        reader
            .history
            .add("ls -l", &crate::HistoryPolicy::default());
        assert!(run(&mut reader, WidgetName::MagicSpace));
        assert_eq!(text(&reader), "echo ls -l ");
    }

    #[test]
    fn test_insert_close_without_blink() {
        let mut reader = reader_with("(a", 2);
        assert!(run(&mut reader, WidgetName::InsertCloseParen));
        assert_eq!(text(&reader), "(a)");
        assert_eq!(cursor(&reader), 3);
    }

    #[test]
    fn test_insert_close_blinks_and_returns() {
        let mut reader = reader_with("(a", 2);
        reader.set_variable(variable_names::BLINK_MATCHING_PAREN, true);
        assert!(run(&mut reader, WidgetName::InsertCloseParen));
        assert_eq!(cursor(&reader), 3);
    }

    #[test_case(WidgetName::BackwardDeleteChar, 0, false, "abc" ; "backspace at start")]
    #[test_case(WidgetName::BackwardDeleteChar, 2, true, "ac" ; "backspace")]
    #[test_case(WidgetName::DeleteChar, 3, false, "abc" ; "delete at end")]
    #[test_case(WidgetName::DeleteChar, 0, true, "bc" ; "delete")]
    fn test_delete_chars(widget: WidgetName, at: usize, succeeds: bool, expected: &str) {
        let mut reader = reader_with("abc", at);
        assert_eq!(run(&mut reader, widget), succeeds);
        assert_eq!(text(&reader), expected);
    }

    #[test]
    fn test_delete_words_skip_kill_ring() {
        let mut reader = reader_with("one two three", 7);
        assert!(run(&mut reader, WidgetName::BackwardDeleteWord));
        assert_eq!(text(&reader), "one  three");
        assert!(run(&mut reader, WidgetName::DeleteWord));
        assert_eq!(text(&reader), "one ");
        assert!(reader.state.kill_ring.is_empty());
    }

    #[test]
    fn test_vi_delete_char_fills_register_and_stays_on_line() {
        let mut reader = vi_reader("ab\ncd", 1);
        reader.state.argument.set_count(5);
        assert!(run(&mut reader, WidgetName::ViDeleteChar));
        assert_eq!(text(&reader), "a\ncd");
        assert_eq!(reader.state.vi.registers[&'"'].text, "b");
    }

    #[test]
    fn test_vi_backward_delete_char_stops_at_line_start() {
        let mut reader = vi_reader("ab\ncd", 3);
        assert!(!run(&mut reader, WidgetName::ViBackwardDeleteChar));
        reader.state.buffer.set_cursor(5);
        reader.state.mode.set_mode(crate::EditMode::ViInsert);
        assert!(run(&mut reader, WidgetName::ViBackwardDeleteChar));
        assert_eq!(text(&reader), "ab\nc");
    }

    #[test]
    fn test_transpose_chars() {
        let mut reader = reader_with("abc", 1);
        assert!(run(&mut reader, WidgetName::TransposeChars));
        assert_eq!(text(&reader), "bac");
        assert_eq!(cursor(&reader), 2);

        let mut reader = reader_with("abc", 3);
        assert!(run(&mut reader, WidgetName::TransposeChars));
        assert_eq!(text(&reader), "acb");

        let mut reader = reader_with("abc", 0);
        assert!(!run(&mut reader, WidgetName::TransposeChars));
    }

    #[test]
    fn test_transpose_words() {
        let mut reader = reader_with("one two", 5);
        assert!(run(&mut reader, WidgetName::TransposeWords));
        assert_eq!(text(&reader), "two one");
        assert_eq!(cursor(&reader), 7);

        let mut reader = reader_with("one two  ", 9);
        assert!(run(&mut reader, WidgetName::TransposeWords));
        assert_eq!(text(&reader), "two one  ");
    }

    #[test]
    fn test_overwrite_mode_toggles() {
        let mut reader = reader_with("abc", 0);
        run(&mut reader, WidgetName::OverwriteMode);
        typed(&mut reader, KeyPress::ch('x'));
        run(&mut reader, WidgetName::SelfInsert);
        assert_eq!(text(&reader), "xbc");
        run(&mut reader, WidgetName::OverwriteMode);
        assert!(!reader.state.buffer.is_overwrite());
    }

    #[test]
    fn test_quoted_insert_inserts_control_codes() {
        let mut reader = reader_with_keys("", 0, "\x01");
        assert!(run(&mut reader, WidgetName::QuotedInsert));
        assert_eq!(text(&reader), "\u{1}");
    }

    #[test]
    fn test_insert_comment_and_toggle() {
        let mut reader = reader_with("ls\npwd", 0);
        assert!(run(&mut reader, WidgetName::InsertComment));
        assert_eq!(text(&reader), "#ls\n#pwd");
        assert!(reader.state.accepted);

        let mut reader = reader_with("#ls", 0);
        assert!(run(&mut reader, WidgetName::ViInsertComment));
        assert_eq!(text(&reader), "ls");
    }

    #[test]
    fn test_copy_prev_word() {
        let mut reader = reader_with("cp file ", 8);
        assert!(run(&mut reader, WidgetName::CopyPrevWord));
        assert_eq!(text(&reader), "cp file file");
    }

    #[test]
    fn test_undo_and_redo_restore_snapshots() {
        let mut reader = reader_with("abc", 3);
        let before = reader.state.buffer.snapshot();
        reader.state.buffer.backspace(1);
        reader.state.undo.record(before);

        assert!(run(&mut reader, WidgetName::Undo));
        assert_eq!(text(&reader), "abc");
        assert!(!run(&mut reader, WidgetName::Undo));
        assert!(run(&mut reader, WidgetName::Redo));
        assert_eq!(text(&reader), "ab");
        assert!(run(&mut reader, WidgetName::SplitUndo));
    }
}
