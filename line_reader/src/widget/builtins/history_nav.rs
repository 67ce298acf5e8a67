// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{count, motion, repeat_count};
use crate::{EditMode, LineReader, LineReaderOption, SearchDirection, SearchKind, WidgetResult,
            reader::InsertLastWord};

/// The oldest entry navigation may reach. With `set-local-history` on, only lines added
/// by this reader.
fn history_floor(reader: &LineReader) -> usize {
    if reader.state.local_history {
        reader.local_history_start.min(reader.history.len())
    } else {
        0
    }
}

/// Put history entry `index` in the buffer, or the line being edited when `index` is
/// one past the newest entry. That line is parked when navigation first leaves it.
pub(super) fn show_entry(reader: &mut LineReader, index: usize, cursor_at_start: bool) -> bool {
    let len = reader.history.len();
    let current = reader.history.index();
    if index > len {
        return false;
    }
    if index != current {
        if current >= len {
            reader.state.history_saved_line = Some(reader.state.buffer.text());
        }
        let text = if index == len {
            reader.state.history_saved_line.take().unwrap_or_default()
        } else {
            reader.history.get(index).unwrap_or_default().to_string()
        };
        reader.history.move_to(index);
        reader.state.buffer.replace_all(&text);
        tracing::debug!(message = "history entry shown", index, len);
    }
    if cursor_at_start {
        let buffer = &mut reader.state.buffer;
        buffer.set_cursor(motion::first_non_blank(buffer, 0));
    }
    true
}

pub(super) fn cases_ignored(reader: &LineReader) -> bool {
    reader.is_set(LineReaderOption::CaseInsensitive)
}

/// Step `count` entries older (`backward`) or newer, stopping at either end. Running
/// into an end rings the bell when `HISTORY_BEEP` is set.
fn step_history(reader: &mut LineReader, backward: bool) -> WidgetResult {
    let backward = backward == (count(reader) >= 0);
    let n = repeat_count(reader);
    let index = reader.history.index();
    let target = if backward {
        index.saturating_sub(n).max(history_floor(reader))
    } else {
        index.saturating_add(n).min(reader.history.len())
    };
    if target == index {
        return Ok(!reader.is_set(LineReaderOption::HistoryBeep));
    }
    Ok(show_entry(reader, target, false))
}

pub(super) fn up_history(reader: &mut LineReader) -> WidgetResult { step_history(reader, true) }

pub(super) fn down_history(reader: &mut LineReader) -> WidgetResult { step_history(reader, false) }

/// Move up or down `count` lines within the buffer. `false` if it couldn't move at
/// all.
fn move_lines(reader: &mut LineReader, up: bool) -> bool {
    let up = up == (count(reader) >= 0);
    let times = repeat_count(reader);
    let buffer = &mut reader.state.buffer;
    let mut moved = false;
    for _ in 0..times {
        let stepped = if up { buffer.up_line() } else { buffer.down_line() };
        if !stepped {
            break;
        }
        moved = true;
    }
    moved
}

pub(super) fn up_line(reader: &mut LineReader) -> WidgetResult { Ok(move_lines(reader, true)) }

pub(super) fn down_line(reader: &mut LineReader) -> WidgetResult { Ok(move_lines(reader, false)) }

/// Move within a multi line buffer, and on to the next history entry from its first
/// or last line. Waiting operators only get the line move.
fn line_or_history(reader: &mut LineReader, up: bool, vi: bool) -> WidgetResult {
    let moved = if move_lines(reader, up) {
        true
    } else if reader.state.mode.mode() == EditMode::ViOperatorPending {
        false
    } else {
        step_history(reader, up)?
    };
    if moved && vi {
        let buffer = &mut reader.state.buffer;
        buffer.set_cursor(motion::first_non_blank(buffer, buffer.cursor()));
    }
    Ok(moved)
}

pub(super) fn up_line_or_history(reader: &mut LineReader) -> WidgetResult {
    line_or_history(reader, true, false)
}

pub(super) fn down_line_or_history(reader: &mut LineReader) -> WidgetResult {
    line_or_history(reader, false, false)
}

pub(super) fn vi_up_line_or_history(reader: &mut LineReader) -> WidgetResult {
    line_or_history(reader, true, true)
}

pub(super) fn vi_down_line_or_history(reader: &mut LineReader) -> WidgetResult {
    line_or_history(reader, false, true)
}

pub(super) fn up_line_or_search(reader: &mut LineReader) -> WidgetResult {
    if move_lines(reader, true) {
        return Ok(true);
    }
    history_search(reader, SearchDirection::Backward, false)
}

pub(super) fn down_line_or_search(reader: &mut LineReader) -> WidgetResult {
    if move_lines(reader, false) {
        return Ok(true);
    }
    history_search(reader, SearchDirection::Forward, false)
}

pub(super) fn beginning_of_history(reader: &mut LineReader) -> WidgetResult {
    if reader.history.len() <= history_floor(reader) {
        return Ok(false);
    }
    let floor = history_floor(reader);
    Ok(show_entry(reader, floor, false))
}

pub(super) fn end_of_history(reader: &mut LineReader) -> WidgetResult {
    let len = reader.history.len();
    Ok(show_entry(reader, len, false))
}

pub(super) fn beginning_of_buffer_or_history(reader: &mut LineReader) -> WidgetResult {
    if reader.state.buffer.cursor() > 0 {
        reader.state.buffer.set_cursor(0);
        return Ok(true);
    }
    beginning_of_history(reader)
}

pub(super) fn end_of_buffer_or_history(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    if buffer.cursor() < buffer.len() {
        buffer.set_cursor(buffer.len());
        return Ok(true);
    }
    end_of_history(reader)
}

/// Start of the line; from there the start of the line above, then the previous
/// history entry.
pub(super) fn beginning_of_line_hist(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    let start = buffer.line_start(cursor);
    if cursor == start && !buffer.up_line() && !step_history(reader, true)? {
        return Ok(false);
    }
    let buffer = &mut reader.state.buffer;
    buffer.set_cursor(buffer.line_start(buffer.cursor()));
    Ok(true)
}

pub(super) fn end_of_line_hist(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    let end = buffer.line_end(cursor);
    if cursor == end && !buffer.down_line() && !step_history(reader, false)? {
        return Ok(false);
    }
    let buffer = &mut reader.state.buffer;
    buffer.set_cursor(buffer.line_end(buffer.cursor()));
    Ok(true)
}

/// The next entry in `direction` starting with the search prefix and different from
/// the buffer. The prefix is fixed by the first press of a run: the first word of the
/// line, or with `up_to_cursor` everything before the cursor (which then stays put).
pub(super) fn history_search(
    reader: &mut LineReader,
    direction: SearchDirection,
    up_to_cursor: bool,
) -> WidgetResult {
    let direction = if count(reader) < 0 {
        direction.reversed()
    } else {
        direction
    };
    let prefix = match &reader.state.history_search_prefix {
        Some(prefix) => prefix.clone(),
        None => {
            let buffer = &reader.state.buffer;
            let prefix = if up_to_cursor {
                buffer.substring(0..buffer.cursor())
            } else {
                buffer
                    .text()
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string()
            };
            reader.state.history_search_prefix = Some(prefix.clone());
            prefix
        }
    };

    let current = reader.state.buffer.text();
    let cursor = reader.state.buffer.cursor();
    let floor = history_floor(reader);
    let ignore_case = cases_ignored(reader);
    let mut from = reader.history.index();
    let found = loop {
        match reader
            .history
            .search(&prefix, from, direction, SearchKind::Prefix, ignore_case)
        {
            Some(index) if index < floor => break None,
            Some(index) if reader.history.get(index) == Some(current.as_str()) => from = index,
            other => break other,
        }
    };

    let index = match found {
        Some(index) => index,
        // Searching forward past the newest match returns to the line being edited.
        None if direction == SearchDirection::Forward
            && reader.history.index() < reader.history.len() =>
        {
            reader.history.len()
        }
        None => return Ok(false),
    };
    show_entry(reader, index, false);
    if up_to_cursor {
        reader.state.buffer.set_cursor(cursor);
    }
    Ok(true)
}

/// Vi `/` and `?`. An empty pattern repeats the last one; a leading `^` anchors it to
/// the start of the entry.
pub(super) fn vi_history_search(reader: &mut LineReader, direction: SearchDirection) -> WidgetResult {
    let prompt = match direction {
        SearchDirection::Backward => "/",
        SearchDirection::Forward => "?",
    };
    let Some(input) = reader.read_minibuffer(prompt, &[])? else {
        return Ok(true);
    };
    let (pattern, direction) = if input.is_empty() {
        match reader.state.vi.last_search.clone() {
            Some(last) => last,
            None => return Ok(false),
        }
    } else {
        (input, direction)
    };
    reader.state.vi.last_search = Some((pattern.clone(), direction));
    vi_search(reader, &pattern, direction)
}

fn vi_search(reader: &mut LineReader, pattern: &str, direction: SearchDirection) -> WidgetResult {
    let (pattern, kind) = match pattern.strip_prefix('^') {
        Some(rest) => (rest, SearchKind::Prefix),
        None => (pattern, SearchKind::Substring),
    };
    let from = reader.history.index();
    let found = reader
        .history
        .search(pattern, from, direction, kind, cases_ignored(reader))
        .filter(|index| *index >= history_floor(reader));
    match found {
        Some(index) => Ok(show_entry(reader, index, true)),
        None => Ok(false),
    }
}

/// `n` repeats the last `/` or `?`, `N` (`reverse`) goes the other way.
pub(super) fn vi_repeat_search(reader: &mut LineReader, reverse: bool) -> WidgetResult {
    let Some((pattern, direction)) = reader.state.vi.last_search.clone() else {
        return Ok(false);
    };
    let direction = if reverse {
        direction.reversed()
    } else {
        direction
    };
    vi_search(reader, &pattern, direction)
}

/// `G`: the entry numbered by the argument (from 1), or the line being edited.
pub(super) fn vi_fetch_history(reader: &mut LineReader) -> WidgetResult {
    let len = reader.history.len();
    let index = if reader.state.argument.is_active() {
        match usize::try_from(count(reader)) {
            Ok(number) if (1..=len).contains(&number) => number - 1,
            _ => return Ok(false),
        }
    } else {
        len
    };
    Ok(show_entry(reader, index, true))
}

/// Find the newest entry equal to the buffer and fetch the one after it.
pub(super) fn infer_next_history(reader: &mut LineReader) -> WidgetResult {
    let text = reader.state.buffer.text();
    let len = reader.history.len();
    let found = (0..len)
        .rev()
        .find(|index| reader.history.get(*index) == Some(text.as_str()));
    match found {
        Some(index) if index + 1 < len => Ok(show_entry(reader, index + 1, false)),
        _ => Ok(false),
    }
}

/// Insert the last word of the previous entry. Pressed again, the word is replaced by
/// the last word of the entry before that.
pub(super) fn insert_last_word(reader: &mut LineReader) -> WidgetResult {
    let (mut index, replace) = match reader.state.insert_last_word.clone() {
        Some(InsertLastWord {
            history_index,
            range,
        }) => (history_index, Some(range)),
        None => (reader.history.index(), None),
    };
    let floor = history_floor(reader);
    let word = loop {
        if index <= floor {
            return Ok(false);
        }
        index -= 1;
        if let Some(word) = reader
            .history
            .get(index)
            .and_then(|entry| entry.split_whitespace().last())
        {
            break word.to_string();
        }
    };

    let buffer = &mut reader.state.buffer;
    let start = match replace {
        Some(range) => {
            buffer.replace_range(range.clone(), &word);
            range.start
        }
        None => {
            let start = buffer.cursor();
            buffer.insert(&word);
            start
        }
    };
    reader.state.insert_last_word = Some(InsertLastWord {
        history_index: index,
        range: start..buffer.cursor(),
    });
    Ok(true)
}

pub(super) fn set_local_history(reader: &mut LineReader) -> WidgetResult {
    reader.state.local_history = !reader.state.local_history;
    tracing::debug!(message = "local history", enabled = reader.state.local_history);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{cursor, reader_with, reader_with_keys, run, text};
    use crate::{History, LineReader, LineReaderOption, MemoryHistory, WidgetName};
    use pretty_assertions::assert_eq;

    fn with_history(reader: &mut LineReader, lines: &[&str]) {
        reader.history = Box::new(MemoryHistory::from_lines(lines));
        reader.history.move_to_end();
    }

    #[test]
    fn test_up_and_down_history_park_the_edited_line() {
        let mut reader = reader_with("draft", 5);
        with_history(&mut reader, &["ls", "pwd"]);
        assert!(run(&mut reader, WidgetName::UpHistory));
        assert_eq!(text(&reader), "pwd");
        assert!(run(&mut reader, WidgetName::UpHistory));
        assert_eq!(text(&reader), "ls");
        assert!(!run(&mut reader, WidgetName::UpHistory));
        assert!(run(&mut reader, WidgetName::DownHistory));
        assert!(run(&mut reader, WidgetName::DownHistory));
        assert_eq!(text(&reader), "draft");
        assert!(!run(&mut reader, WidgetName::DownHistory));

        reader.options_mut().unset(LineReaderOption::HistoryBeep);
        assert!(run(&mut reader, WidgetName::DownHistory));
    }

    #[test]
    fn test_line_or_history_moves_lines_first() {
        let mut reader = reader_with("ab\ncd", 4);
        with_history(&mut reader, &["old"]);
        assert!(run(&mut reader, WidgetName::UpLineOrHistory));
        assert_eq!(cursor(&reader), 1);
        assert!(run(&mut reader, WidgetName::UpLineOrHistory));
        assert_eq!(text(&reader), "old");
    }

    #[test]
    fn test_up_and_down_line_take_a_count() {
        let mut reader = reader_with("a\nb\nc", 4);
        reader.state.argument.set_count(2);
        assert!(run(&mut reader, WidgetName::UpLine));
        assert_eq!(cursor(&reader), 0);
        reader.state.argument.set_count(5);
        assert!(run(&mut reader, WidgetName::DownLine));
        assert_eq!(cursor(&reader), 4);
    }

    #[test]
    fn test_vi_line_or_history_lands_on_first_non_blank() {
        let mut reader = reader_with("x", 1);
        with_history(&mut reader, &["  indented"]);
        assert!(run(&mut reader, WidgetName::ViUpLineOrHistory));
        assert_eq!(cursor(&reader), 2);
    }

    #[test]
    fn test_history_search_by_first_word() {
        let mut reader = reader_with("git x", 5);
        with_history(&mut reader, &["git commit", "ls", "git push"]);
        assert!(run(&mut reader, WidgetName::HistorySearchBackward));
        assert_eq!(text(&reader), "git push");
        assert!(run(&mut reader, WidgetName::HistorySearchBackward));
        assert_eq!(text(&reader), "git commit");
        assert!(!run(&mut reader, WidgetName::HistorySearchBackward));
        assert!(run(&mut reader, WidgetName::HistorySearchForward));
        assert_eq!(text(&reader), "git push");
        assert!(run(&mut reader, WidgetName::HistorySearchForward));
        assert_eq!(text(&reader), "git x");
    }

    #[test]
    fn test_history_search_skips_entries_equal_to_buffer() {
        let mut reader = reader_with("ls -l", 5);
        with_history(&mut reader, &["ls -a", "ls -l"]);
        assert!(run(&mut reader, WidgetName::HistorySearchBackward));
        assert_eq!(text(&reader), "ls -a");
    }

    #[test]
    fn test_beginning_search_keeps_cursor() {
        let mut reader = reader_with("git p", 5);
        with_history(&mut reader, &["git push", "git commit"]);
        assert!(run(&mut reader, WidgetName::HistoryBeginningSearchBackward));
        assert_eq!(text(&reader), "git push");
        assert_eq!(cursor(&reader), 5);
    }

    #[test]
    fn test_vi_search_and_repeat() {
        let mut reader = reader_with_keys("", 0, "pu\r");
        with_history(&mut reader, &["git push", "ls", "git pull"]);
        assert!(run(&mut reader, WidgetName::ViHistorySearchBackward));
        assert_eq!(text(&reader), "git pull");
        assert_eq!(cursor(&reader), 0);
        assert!(run(&mut reader, WidgetName::ViRepeatSearch));
        assert_eq!(text(&reader), "git push");
        assert!(!run(&mut reader, WidgetName::ViRepeatSearch));
        assert!(run(&mut reader, WidgetName::ViRevRepeatSearch));
        assert_eq!(text(&reader), "git pull");
    }

    #[test]
    fn test_vi_search_anchored() {
        let mut reader = reader_with_keys("", 0, "^ls\r");
        with_history(&mut reader, &["ls -a", "echo ls"]);
        assert!(run(&mut reader, WidgetName::ViHistorySearchBackward));
        assert_eq!(text(&reader), "ls -a");
    }

    #[test]
    fn test_vi_fetch_history() {
        let mut reader = reader_with("now", 3);
        with_history(&mut reader, &["first", "second"]);
        reader.state.argument.set_count(1);
        assert!(run(&mut reader, WidgetName::ViFetchHistory));
        assert_eq!(text(&reader), "first");
        reader.state.argument.clear();
        assert!(run(&mut reader, WidgetName::ViFetchHistory));
        assert_eq!(text(&reader), "now");
        reader.state.argument.set_count(9);
        assert!(!run(&mut reader, WidgetName::ViFetchHistory));
    }

    #[test]
    fn test_infer_next_history() {
        let mut reader = reader_with("ls", 2);
        with_history(&mut reader, &["ls", "pwd", "ls", "cd /"]);
        assert!(run(&mut reader, WidgetName::InferNextHistory));
        assert_eq!(text(&reader), "cd /");
    }

    #[test]
    fn test_insert_last_word_walks_back() {
        let mut reader = reader_with("vim ", 4);
        with_history(&mut reader, &["echo a b", "cat file"]);
        assert!(run(&mut reader, WidgetName::InsertLastWord));
        assert_eq!(text(&reader), "vim file");
        assert!(run(&mut reader, WidgetName::InsertLastWord));
        assert_eq!(text(&reader), "vim b");
        assert!(!run(&mut reader, WidgetName::InsertLastWord));
    }

    #[test]
    fn test_buffer_or_history_and_line_hist() {
        let mut reader = reader_with("abc", 2);
        with_history(&mut reader, &["old"]);
        assert!(run(&mut reader, WidgetName::BeginningOfBufferOrHistory));
        assert_eq!(cursor(&reader), 0);
        assert!(run(&mut reader, WidgetName::BeginningOfBufferOrHistory));
        assert_eq!(text(&reader), "old");
        assert!(run(&mut reader, WidgetName::EndOfHistory));
        assert_eq!(text(&reader), "abc");

        reader.state.buffer.set_cursor(0);
        assert!(run(&mut reader, WidgetName::BeginningOfLineHist));
        assert_eq!((text(&reader), cursor(&reader)), ("old".to_string(), 0));
        assert!(run(&mut reader, WidgetName::EndOfLineHist));
        assert_eq!(cursor(&reader), 3);
    }

    #[test]
    fn test_local_history_hides_older_entries() {
        let mut reader = reader_with("", 0);
        with_history(&mut reader, &["imported"]);
        reader.local_history_start = 1;
        reader
            .history
            .add("mine", &crate::HistoryPolicy::default());
        assert!(run(&mut reader, WidgetName::SetLocalHistory));
        assert!(run(&mut reader, WidgetName::UpHistory));
        assert_eq!(text(&reader), "mine");
        assert!(!run(&mut reader, WidgetName::UpHistory));
        assert!(run(&mut reader, WidgetName::SetLocalHistory));
        assert!(run(&mut reader, WidgetName::UpHistory));
        assert_eq!(text(&reader), "imported");
    }
}
