// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{count, editing, repeat_count, vi_operator};
use crate::{KillDirection, LineReader, RegionType, ViOperator, WidgetName, WidgetResult,
            reader::{UNNAMED_REGISTER, ViRegister}};

/// Delete `start..end` into the kill ring, joining with the previous kill when the
/// last widget was one too.
fn kill_range(reader: &mut LineReader, start: usize, end: usize, direction: KillDirection) -> bool {
    let join = reader.state.last_widget.is_some_and(WidgetName::is_kill);
    let killed = reader.state.buffer.delete_range(start, end);
    if killed.is_empty() {
        return false;
    }
    reader.state.kill_ring.kill(&killed, direction, join);
    true
}

/// Kill to the end (`forward`) or start of the line, `count` times. At the edge of a
/// line the newline itself is killed.
fn kill_lines(reader: &mut LineReader, forward: bool) -> WidgetResult {
    let forward = forward == (count(reader) >= 0);
    let n = repeat_count(reader);
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let mut pos = cursor;
    for _ in 0..n {
        pos = if forward {
            match buffer.line_end(pos) {
                end if end == pos => (pos + 1).min(buffer.len()),
                end => end,
            }
        } else {
            match buffer.line_start(pos) {
                start if start == pos => pos.saturating_sub(1),
                start => start,
            }
        };
    }
    let direction = if forward {
        KillDirection::Forward
    } else {
        KillDirection::Backward
    };
    Ok(kill_range(reader, cursor.min(pos), cursor.max(pos), direction))
}

pub(super) fn kill_line(reader: &mut LineReader) -> WidgetResult { kill_lines(reader, true) }

pub(super) fn backward_kill_line(reader: &mut LineReader) -> WidgetResult {
    kill_lines(reader, false)
}

pub(super) fn kill_whole_line(reader: &mut LineReader) -> WidgetResult {
    let buffer = &reader.state.buffer;
    let mut last = buffer.cursor();
    for _ in 1..repeat_count(reader) {
        let end = buffer.line_end(last);
        if end >= buffer.len() {
            break;
        }
        last = end + 1;
    }
    let range = buffer.line_span(buffer.cursor(), last);
    Ok(kill_range(reader, range.start, range.end, KillDirection::Forward))
}

fn kill_words(reader: &mut LineReader, forward: bool) -> WidgetResult {
    let (start, end) = editing::word_span(reader, forward);
    let direction = if start == reader.state.buffer.cursor() {
        KillDirection::Forward
    } else {
        KillDirection::Backward
    };
    Ok(kill_range(reader, start, end, direction))
}

pub(super) fn kill_word(reader: &mut LineReader) -> WidgetResult { kill_words(reader, true) }

pub(super) fn backward_kill_word(reader: &mut LineReader) -> WidgetResult {
    kill_words(reader, false)
}

/// Kill between mark and cursor.
pub(super) fn kill_region(reader: &mut LineReader) -> WidgetResult {
    let Some(mark) = reader.state.buffer.mark() else {
        return Ok(false);
    };
    let cursor = reader.state.buffer.cursor();
    let direction = if mark < cursor {
        KillDirection::Backward
    } else {
        KillDirection::Forward
    };
    let killed = kill_range(reader, mark, cursor, direction);
    reader.state.clear_region();
    Ok(killed)
}

pub(super) fn copy_region_as_kill(reader: &mut LineReader) -> WidgetResult {
    let buffer = &reader.state.buffer;
    let Some(mark) = buffer.mark() else {
        return Ok(false);
    };
    let text = buffer.substring(mark.min(buffer.cursor())..mark.max(buffer.cursor()));
    if text.is_empty() {
        return Ok(false);
    }
    reader.state.kill_ring.add(&text);
    reader.state.region_type = RegionType::None;
    Ok(true)
}

pub(super) fn kill_buffer(reader: &mut LineReader) -> WidgetResult {
    let len = reader.state.buffer.len();
    Ok(kill_range(reader, 0, len, KillDirection::Forward))
}

/// Vi insert `^U`: kill from the start of the line to the cursor.
pub(super) fn vi_kill_line(reader: &mut LineReader) -> WidgetResult {
    let cursor = reader.state.buffer.cursor();
    let start = reader.state.buffer.line_start(cursor);
    Ok(kill_range(reader, start, cursor, KillDirection::Backward))
}

/// `D`: delete to the end of the line into the register.
pub(super) fn vi_kill_eol(reader: &mut LineReader) -> WidgetResult {
    let cursor = reader.state.buffer.cursor();
    let end = reader.state.buffer.line_end(cursor);
    vi_operator::apply_operator(reader, ViOperator::Delete, cursor..end, false)
}

/// Vi insert `^W`: kill the vi word before the cursor, not past the start of the line.
pub(super) fn vi_backward_kill_word(reader: &mut LineReader) -> WidgetResult {
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let start = crate::vi_backward_word(buffer.chars(), cursor, false).max(buffer.line_start(cursor));
    Ok(kill_range(reader, start, cursor, KillDirection::Backward))
}

pub(super) fn yank(reader: &mut LineReader) -> WidgetResult {
    let Some(text) = reader.state.kill_ring.yank().map(str::to_string) else {
        return Ok(false);
    };
    let start = reader.state.buffer.cursor();
    reader.state.buffer.insert(&text);
    reader.state.yanked = Some(start..reader.state.buffer.cursor());
    Ok(true)
}

/// Replace the text just yanked with the next older kill.
pub(super) fn yank_pop(reader: &mut LineReader) -> WidgetResult {
    if !reader.state.last_widget.is_some_and(WidgetName::is_yank) {
        return Ok(false);
    }
    let Some(range) = reader.state.yanked.clone() else {
        return Ok(false);
    };
    let Some(text) = reader.state.kill_ring.yank_pop().map(str::to_string) else {
        return Ok(false);
    };
    reader.state.buffer.replace_range(range.clone(), &text);
    reader.state.yanked = Some(range.start..reader.state.buffer.cursor());
    Ok(true)
}

/// The register to put from: the one named with `"x`, else the unnamed one, else the
/// newest kill.
fn put_source(reader: &mut LineReader) -> Option<ViRegister> {
    let name = reader
        .state
        .vi
        .selected_register
        .take()
        .unwrap_or(UNNAMED_REGISTER)
        .to_ascii_lowercase();
    if let Some(register) = reader.state.vi.registers.get(&name) {
        return Some(register.clone());
    }
    if name != UNNAMED_REGISTER {
        return None;
    }
    reader.state.kill_ring.yank().map(|text| ViRegister {
        text: text.to_string(),
        linewise: false,
    })
}

/// `p` / `P`. Linewise text goes on its own line below or above; otherwise after or at
/// the cursor, leaving the cursor on the last char put.
pub(super) fn vi_put(reader: &mut LineReader, after: bool) -> WidgetResult {
    let Some(ViRegister { text, linewise }) = put_source(reader) else {
        return Ok(false);
    };
    if text.is_empty() {
        return Ok(false);
    }
    let n = repeat_count(reader);
    let buffer = &mut reader.state.buffer;
    let cursor = buffer.cursor();

    if linewise {
        let lines = vec![text.as_str(); n].join("\n");
        if after {
            let end = buffer.line_end(cursor);
            buffer.set_cursor(end);
            buffer.insert_after_cursor(&format!("\n{lines}"));
            buffer.set_cursor(end + 1);
        } else {
            let start = buffer.line_start(cursor);
            buffer.set_cursor(start);
            buffer.insert_after_cursor(&format!("{lines}\n"));
        }
        return Ok(true);
    }

    let text = text.repeat(n);
    let at = if after && cursor < buffer.line_end(cursor) {
        cursor + 1
    } else {
        cursor
    };
    buffer.set_cursor(at);
    buffer.insert_after_cursor(&text);
    buffer.set_cursor(at + text.chars().count() - 1);
    Ok(true)
}

/// Visual `p`: replace the selection with the register, which then holds the
/// replaced text.
pub(super) fn put_replace_selection(reader: &mut LineReader) -> WidgetResult {
    let Some(range) = reader.state.active_region() else {
        return Ok(false);
    };
    let Some(ViRegister { text, .. }) = put_source(reader) else {
        return Ok(false);
    };
    let linewise = reader.state.region_type == RegionType::Line;
    let replaced = reader.state.buffer.substring(range.clone());
    let replacement = match (linewise, replaced.starts_with('\n'), replaced.ends_with('\n')) {
        (true, true, _) => format!("\n{text}"),
        (true, false, true) => format!("{text}\n"),
        _ => text,
    };
    let buffer = &mut reader.state.buffer;
    buffer.replace_range(range.clone(), &replacement);
    buffer.set_cursor((range.start + replacement.chars().count()).saturating_sub(1));
    vi_operator::store_register(reader, &replaced, linewise);
    reader.state.clear_region();
    Ok(true)
}
