// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{count, repeat_count, wordchars};
use crate::{Buffer, EditMode, LineReader, RegionType, ViFind, WidgetResult, backward_word_start,
            forward_word_end, is_word_char};

const BRACKETS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

fn move_to(buffer: &mut Buffer, target: usize) -> bool {
    let before = buffer.cursor();
    buffer.set_cursor(target);
    buffer.cursor() != before
}

pub(super) fn forward_char(reader: &mut LineReader) -> WidgetResult {
    let delta = isize::try_from(count(reader)).unwrap_or_default();
    Ok(reader.state.buffer.move_cursor(delta) != 0)
}

pub(super) fn backward_char(reader: &mut LineReader) -> WidgetResult {
    let delta = isize::try_from(count(reader)).unwrap_or_default();
    Ok(reader.state.buffer.move_cursor(-delta) != 0)
}

/// `l` stays on the line. In command mode it stops on the last char; a pending operator
/// may reach past it so that `dl` on the last char works.
pub(super) fn vi_forward_char(reader: &mut LineReader) -> WidgetResult {
    let n = repeat_count(reader);
    let in_command_mode = reader.state.mode.mode() == EditMode::ViCommand;
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    let line_end = buffer.line_end(cursor);
    let limit = if in_command_mode {
        line_end.saturating_sub(1).max(buffer.line_start(cursor))
    } else {
        line_end
    };
    Ok(move_to(buffer, cursor.saturating_add(n).min(limit)))
}

pub(super) fn vi_backward_char(reader: &mut LineReader) -> WidgetResult {
    let n = repeat_count(reader);
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    let target = cursor.saturating_sub(n).max(buffer.line_start(cursor));
    Ok(move_to(buffer, target))
}

/// Emacs word motion. A negative count goes the other way.
fn word_motion(reader: &mut LineReader, forward: bool, to_word_start: bool) -> WidgetResult {
    let forward = forward == (count(reader) >= 0);
    let n = repeat_count(reader);
    let wordchars = wordchars(reader);
    let is_word = |ch: char| is_word_char(ch, &wordchars);
    let buffer = &mut reader.state.buffer;
    let mut pos = buffer.cursor();
    for _ in 0..n {
        let chars = buffer.chars();
        pos = match (forward, to_word_start) {
            (true, true) => {
                let mut it = pos;
                while it < chars.len() && is_word(chars[it]) {
                    it += 1;
                }
                while it < chars.len() && !is_word(chars[it]) {
                    it += 1;
                }
                it
            }
            (true, false) => forward_word_end(chars, pos, is_word),
            (false, _) => backward_word_start(chars, pos, is_word),
        };
    }
    Ok(move_to(buffer, pos))
}

/// To the start of the next word.
pub(super) fn forward_word(reader: &mut LineReader) -> WidgetResult {
    word_motion(reader, true, true)
}

/// To the end of the next word.
pub(super) fn emacs_forward_word(reader: &mut LineReader) -> WidgetResult {
    word_motion(reader, true, false)
}

pub(super) fn backward_word(reader: &mut LineReader) -> WidgetResult {
    word_motion(reader, false, false)
}

pub(super) fn beginning_of_line(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    buffer.set_cursor(buffer.line_start(buffer.cursor()));
    Ok(true)
}

pub(super) fn end_of_line(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    buffer.set_cursor(buffer.line_end(buffer.cursor()));
    Ok(true)
}

pub(super) fn vi_beginning_of_line(reader: &mut LineReader) -> WidgetResult {
    beginning_of_line(reader)
}

/// `$`: the last char of the line, or of the line `count - 1` below.
pub(super) fn vi_end_of_line(reader: &mut LineReader) -> WidgetResult {
    let n = repeat_count(reader);
    let buffer = &mut reader.state.buffer;
    let mut pos = buffer.cursor();
    for _ in 1..n {
        let end = buffer.line_end(pos);
        if end >= buffer.len() {
            break;
        }
        pos = end + 1;
    }
    let end = buffer.line_end(pos);
    let target = if end > buffer.line_start(pos) { end - 1 } else { end };
    buffer.set_cursor(target);
    Ok(true)
}

pub(super) fn first_non_blank(buffer: &Buffer, pos: usize) -> usize {
    let end = buffer.line_end(pos);
    let mut it = buffer.line_start(pos);
    while it < end && buffer.char_at(it).is_some_and(|ch| ch == ' ' || ch == '\t') {
        it += 1;
    }
    it
}

pub(super) fn vi_first_non_blank(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    buffer.set_cursor(first_non_blank(buffer, buffer.cursor()));
    Ok(true)
}

/// `|`: column `count`, counting from 1.
pub(super) fn vi_goto_column(reader: &mut LineReader) -> WidgetResult {
    let column = repeat_count(reader) - 1;
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    let start = buffer.line_start(cursor);
    let last = buffer.line_end(cursor).saturating_sub(1).max(start);
    buffer.set_cursor(start.saturating_add(column).min(last));
    Ok(true)
}

/// `w` / `W`. Under an operator, the last word of a line stops at the line end, so
/// `dw` there doesn't join the lines.
pub(super) fn vi_forward_word(reader: &mut LineReader, big_word: bool) -> WidgetResult {
    let n = repeat_count(reader);
    let operator_pending = reader.state.mode.mode() == EditMode::ViOperatorPending;
    let buffer = &mut reader.state.buffer;
    let mut pos = buffer.cursor();
    let mut prev = pos;
    for _ in 0..n {
        prev = pos;
        pos = crate::vi_forward_word(buffer.chars(), pos, big_word);
    }
    let line_end = buffer.line_end(prev);
    if operator_pending && pos > line_end && prev < line_end {
        pos = line_end;
    }
    Ok(move_to(buffer, pos))
}

fn vi_step(reader: &mut LineReader, step: fn(&[char], usize, bool) -> usize, big_word: bool) -> bool {
    let n = repeat_count(reader);
    let buffer = &mut reader.state.buffer;
    let mut pos = buffer.cursor();
    for _ in 0..n {
        pos = step(buffer.chars(), pos, big_word);
    }
    move_to(buffer, pos)
}

pub(super) fn vi_backward_word(reader: &mut LineReader, big_word: bool) -> WidgetResult {
    Ok(vi_step(reader, crate::vi_backward_word, big_word))
}

pub(super) fn vi_forward_word_end(reader: &mut LineReader, big_word: bool) -> WidgetResult {
    Ok(vi_step(reader, crate::vi_forward_word_end, big_word))
}

pub(super) fn vi_backward_word_end(reader: &mut LineReader, big_word: bool) -> WidgetResult {
    Ok(vi_step(reader, crate::vi_backward_word_end, big_word))
}

/// Position of the bracket matching the one at `pos`.
pub(super) fn matching_bracket(chars: &[char], pos: usize) -> Option<usize> {
    let ch = *chars.get(pos)?;
    let (open, close) = BRACKETS
        .into_iter()
        .find(|(open, close)| ch == *open || ch == *close)?;
    let mut depth = 0_usize;
    if ch == open {
        for (it, other) in chars.iter().enumerate().skip(pos) {
            if *other == open {
                depth += 1;
            } else if *other == close {
                depth -= 1;
                if depth == 0 {
                    return Some(it);
                }
            }
        }
    } else {
        for it in (0..=pos).rev() {
            if chars[it] == close {
                depth += 1;
            } else if chars[it] == open {
                depth -= 1;
                if depth == 0 {
                    return Some(it);
                }
            }
        }
    }
    None
}

fn is_bracket(ch: char) -> bool {
    BRACKETS
        .iter()
        .any(|(open, close)| ch == *open || ch == *close)
}

/// `%`: from the bracket under the cursor, or the next one on the line, to its match.
pub(super) fn vi_match_bracket(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    let Some(at) = (cursor..buffer.line_end(cursor))
        .find(|pos| buffer.char_at(*pos).is_some_and(is_bracket))
    else {
        return Ok(false);
    };
    match matching_bracket(buffer.chars(), at) {
        Some(target) => Ok(move_to(buffer, target) || target == cursor),
        None => Ok(false),
    }
}

/// Where `find` lands after `count` hits on the cursor's line. A repeated `t` / `T`
/// skips the target it is standing next to.
fn find_target(buffer: &Buffer, find: ViFind, count: usize, repeat: bool) -> Option<usize> {
    let cursor = buffer.cursor();
    let (start, end) = (buffer.line_start(cursor), buffer.line_end(cursor));
    let is_target = |pos: &usize| buffer.char_at(*pos) == Some(find.target);
    let mut pos = cursor;
    for hit in 0..count {
        let skip = if find.till && (repeat || hit > 0) { 2 } else { 1 };
        let found = if find.forward {
            (pos + skip..end).find(is_target)?
        } else {
            (start..pos.saturating_sub(skip - 1)).rev().find(is_target)?
        };
        pos = match (find.till, find.forward) {
            (false, _) => found,
            (true, true) => found - 1,
            (true, false) => found + 1,
        };
    }
    Some(pos)
}

fn jump(reader: &mut LineReader, find: ViFind, repeat: bool) -> bool {
    let n = repeat_count(reader);
    match find_target(&reader.state.buffer, find, n, repeat) {
        Some(target) => {
            reader.state.buffer.set_cursor(target);
            true
        }
        None => false,
    }
}

/// `f`, `F`, `t`, `T`: read the target char, then jump.
pub(super) fn vi_find(reader: &mut LineReader, forward: bool, till: bool) -> WidgetResult {
    let key = reader.read_key_argument()?;
    let Some(target) = key.insertable_char() else {
        return Ok(false);
    };
    let find = ViFind {
        target,
        forward,
        till,
    };
    reader.state.vi.last_find = Some(find);
    Ok(jump(reader, find, false))
}

/// `;`, or `,` with `reverse`.
pub(super) fn vi_repeat_find(reader: &mut LineReader, reverse: bool) -> WidgetResult {
    let Some(mut find) = reader.state.vi.last_find else {
        return Ok(false);
    };
    if reverse {
        find.forward = !find.forward;
    }
    Ok(jump(reader, find, true))
}

/// Emacs `^]`: to the next occurrence of the char read, anywhere in the buffer.
pub(super) fn character_search(reader: &mut LineReader, forward: bool) -> WidgetResult {
    let key = reader.read_key_argument()?;
    let Some(target) = key.insertable_char() else {
        return Ok(false);
    };
    let n = repeat_count(reader);
    let buffer = &mut reader.state.buffer;
    let is_target = |pos: &usize| buffer.char_at(*pos) == Some(target);
    let mut pos = buffer.cursor();
    for _ in 0..n {
        let found = if forward {
            (pos + 1..buffer.len()).find(is_target)
        } else {
            (0..pos).rev().find(is_target)
        };
        match found {
            Some(found) => pos = found,
            None => return Ok(false),
        }
    }
    Ok(move_to(buffer, pos))
}

pub(super) fn set_mark_command(reader: &mut LineReader) -> WidgetResult {
    reader.state.buffer.set_mark();
    reader.state.region_type = RegionType::Char;
    Ok(true)
}

pub(super) fn exchange_point_and_mark(reader: &mut LineReader) -> WidgetResult {
    Ok(reader.state.buffer.exchange_point_and_mark())
}
