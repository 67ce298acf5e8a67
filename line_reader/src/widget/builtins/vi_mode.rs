// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Vi mode switches and the command mode widgets that start an insert. The mode each
//! one lands in comes from the transition table; these set up the buffer for it.

use super::{motion, repeat_count, vi_operator};
use crate::{EditMode, KeyPress, LineReader, RegionType, ViOperator, WidgetResult,
            reader::UNNAMED_REGISTER};

pub(super) fn vi_cmd_mode(reader: &mut LineReader) -> WidgetResult {
    let state = &mut reader.state;
    match state.mode.mode() {
        EditMode::ViOperatorPending => {
            state.mode.finish_operator();
            Ok(true)
        }
        EditMode::Visual => {
            state.clear_region();
            state.mode.set_mode(EditMode::ViCommand);
            Ok(true)
        }
        EditMode::ViCommand => Ok(false),
        _ => {
            let buffer = &mut state.buffer;
            buffer.set_overwrite(false);
            let cursor = buffer.cursor();
            if cursor > buffer.line_start(cursor) {
                buffer.set_cursor(cursor - 1);
            }
            Ok(true)
        }
    }
}

pub(super) fn emacs_editing_mode(reader: &mut LineReader) -> WidgetResult {
    reader.state.buffer.set_overwrite(false);
    reader.state.clear_region();
    Ok(true)
}

pub(super) fn vi_insert(_reader: &mut LineReader) -> WidgetResult { Ok(true) }

pub(super) fn vi_add_next(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    if cursor < buffer.line_end(cursor) {
        buffer.set_cursor(cursor + 1);
    }
    Ok(true)
}

pub(super) fn vi_add_eol(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    buffer.set_cursor(buffer.line_end(buffer.cursor()));
    Ok(true)
}

pub(super) fn vi_insert_bol(reader: &mut LineReader) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    buffer.set_cursor(motion::first_non_blank(buffer, buffer.cursor()));
    Ok(true)
}

/// `O` / `o`: start an empty line above or below the current one.
pub(super) fn vi_open_line(reader: &mut LineReader, above: bool) -> WidgetResult {
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    if above {
        let start = buffer.line_start(cursor);
        buffer.set_cursor(start);
        buffer.insert_char('\n');
        buffer.set_cursor(start);
    } else {
        buffer.set_cursor(buffer.line_end(cursor));
        buffer.insert_char('\n');
    }
    Ok(true)
}

/// Delete `range` into the register and start inserting. Nothing to delete still
/// starts the insert.
fn change(reader: &mut LineReader, range: std::ops::Range<usize>, linewise: bool) -> WidgetResult {
    if range.is_empty() {
        return Ok(true);
    }
    vi_operator::apply_operator(reader, ViOperator::Change, range, linewise)
}

/// `s`: replace `count` chars, staying on the line.
pub(super) fn vi_substitute(reader: &mut LineReader) -> WidgetResult {
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let end = cursor
        .saturating_add(repeat_count(reader))
        .min(buffer.line_end(cursor));
    change(reader, cursor..end, false)
}

/// `C`
pub(super) fn vi_change_eol(reader: &mut LineReader) -> WidgetResult {
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let end = buffer.line_end(cursor);
    change(reader, cursor..end, false)
}

/// `S`
pub(super) fn vi_change_whole_line(reader: &mut LineReader) -> WidgetResult {
    let range = vi_operator::lines_from(reader, reader.state.buffer.cursor(), repeat_count(reader));
    change(reader, range, true)
}

/// `R`: typed chars replace the ones under the cursor until command mode.
pub(super) fn vi_replace(reader: &mut LineReader) -> WidgetResult {
    reader.state.buffer.set_overwrite(true);
    Ok(true)
}

/// `r`: replace `count` chars with the next key typed. Fails if the line is too
/// short, and `Esc` cancels.
pub(super) fn vi_replace_chars(reader: &mut LineReader) -> WidgetResult {
    let key = reader.read_key_argument()?;
    let Some(ch) = key.insertable_char() else {
        return Ok(false);
    };
    let n = repeat_count(reader);
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();
    let end = cursor.saturating_add(n);
    if end > buffer.line_end(cursor) {
        return Ok(false);
    }
    if ch == '\n' {
        buffer.replace_range(cursor..end, "\n");
    } else {
        buffer.replace_range(cursor..end, &ch.to_string().repeat(n));
        buffer.set_cursor(end - 1);
    }
    Ok(true)
}

/// Join the line holding `pos` with the `joins` lines after it. Leading blanks of a
/// joined line become one space. `false` if there was no line to join.
fn join_lines(reader: &mut LineReader, pos: usize, joins: usize) -> bool {
    let buffer = &mut reader.state.buffer;
    let mut joined = false;
    for _ in 0..joins {
        let end = buffer.line_end(pos);
        if end >= buffer.len() {
            break;
        }
        let mut next = end + 1;
        while buffer
            .char_at(next)
            .is_some_and(|ch| ch == ' ' || ch == '\t')
        {
            next += 1;
        }
        let next_is_empty = buffer.char_at(next).is_none_or(|ch| ch == '\n');
        let ends_blank = end == buffer.line_start(end)
            || buffer
                .char_at(end - 1)
                .is_some_and(char::is_whitespace);
        let separator = if next_is_empty || ends_blank { "" } else { " " };
        buffer.replace_range(end..next, separator);
        buffer.set_cursor(end);
        joined = true;
    }
    joined
}

/// `J`: `count` lines become one (at least two). In visual mode, the selected lines.
pub(super) fn vi_join(reader: &mut LineReader) -> WidgetResult {
    if reader.state.mode.mode() == EditMode::Visual {
        let Some(range) = reader.state.active_region() else {
            return Ok(false);
        };
        let selected = reader.state.buffer.substring(range.clone());
        let selected = selected
            .strip_prefix('\n')
            .or_else(|| selected.strip_suffix('\n'))
            .unwrap_or(&selected);
        let joins = selected.matches('\n').count().max(1);
        return Ok(join_lines(reader, range.start, joins));
    }
    let joins = repeat_count(reader).saturating_sub(1).max(1);
    let cursor = reader.state.buffer.cursor();
    Ok(join_lines(reader, cursor, joins))
}

/// `v` / `V`: start selecting. Typed again it stops; the other one switches between
/// char and line selection.
pub(super) fn visual_mode(reader: &mut LineReader, region_type: RegionType) -> WidgetResult {
    let state = &mut reader.state;
    if state.mode.mode() == EditMode::Visual {
        if state.region_type == region_type {
            state.clear_region();
            state.mode.set_mode(EditMode::ViCommand);
        } else {
            state.region_type = region_type;
        }
        return Ok(true);
    }
    state.buffer.set_mark();
    state.region_type = region_type;
    Ok(true)
}

/// `.`: replay the keys of the last change. A count typed before `.` replaces the one
/// the change was made with.
pub(super) fn vi_repeat_change(reader: &mut LineReader) -> WidgetResult {
    let Some(last_change) = reader.state.vi.last_change.clone() else {
        return Ok(false);
    };
    let mut keys = last_change.to_vec();
    if reader.state.argument.is_active() {
        let count_keys = keys
            .iter()
            .take_while(|key| key.digit_value().is_some())
            .count();
        let count = reader.state.argument.count().unsigned_abs().to_string();
        keys.splice(..count_keys, count.chars().map(KeyPress::ch));
    }
    tracing::debug!(message = "repeat change", keys = keys.len());
    reader.input.push_front_keys(&keys);
    Ok(true)
}

/// `"x`: name the register for the next yank, delete, or put.
pub(super) fn vi_set_buffer(reader: &mut LineReader) -> WidgetResult {
    let key = reader.read_key_argument()?;
    match key.printable_char() {
        Some(name) if name.is_ascii_alphanumeric() || name == UNNAMED_REGISTER => {
            reader.state.vi.selected_register = Some(name);
            Ok(true)
        }
        _ => Ok(false),
    }
}
