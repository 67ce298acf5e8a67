// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

use super::{case_change, motion, repeat_count};
use crate::{EditMode, LineReader, PendingOperator, RegionType, ViOperator, WidgetResult,
            reader::{UNNAMED_REGISTER, ViRegister}};

/// Apply `operator` to `range`. `linewise` ranges come from [`crate::Buffer::line_span`]
/// and carry one newline that is not part of the stored text.
pub(crate) fn apply_operator(
    reader: &mut LineReader,
    operator: ViOperator,
    range: Range<usize>,
    linewise: bool,
) -> WidgetResult {
    if range.is_empty() {
        return Ok(false);
    }
    tracing::debug!(message = "vi operator", ?operator, start = range.start, end = range.end, linewise);
    let text = reader.state.buffer.substring(range.clone());

    match operator {
        ViOperator::Yank => {
            store_register(reader, &text, linewise);
            if !linewise {
                reader.state.buffer.set_cursor(range.start);
            }
        }
        ViOperator::Delete => {
            store_register(reader, &text, linewise);
            let buffer = &mut reader.state.buffer;
            buffer.delete_range(range.start, range.end);
            buffer.set_cursor(range.start);
            if linewise {
                buffer.set_cursor(motion::first_non_blank(buffer, buffer.cursor()));
            }
        }
        ViOperator::Change => {
            store_register(reader, &text, linewise);
            // Changing lines leaves one empty line to type into.
            let (from, to) = match (linewise, text.starts_with('\n'), text.ends_with('\n')) {
                (true, true, _) => (range.start + 1, range.end),
                (true, false, true) => (range.start, range.end - 1),
                _ => (range.start, range.end),
            };
            let buffer = &mut reader.state.buffer;
            buffer.delete_range(from, to);
            buffer.set_cursor(from);
            reader.state.mode.set_mode(EditMode::ViInsert);
        }
        ViOperator::SwapCase => {
            case_change::swap_case_range(reader, range.clone());
            reader.state.buffer.set_cursor(range.start);
        }
    }
    Ok(true)
}

/// Save yanked or deleted text in the selected register and the unnamed one. An
/// uppercase register name appends to the lowercase register.
pub(super) fn store_register(reader: &mut LineReader, text: &str, linewise: bool) {
    let text = if linewise {
        text.strip_prefix('\n')
            .or_else(|| text.strip_suffix('\n'))
            .unwrap_or(text)
    } else {
        text
    };
    let vi = &mut reader.state.vi;
    let mut register = ViRegister {
        text: text.to_string(),
        linewise,
    };
    match vi.selected_register.take() {
        Some(name) if name.is_ascii_uppercase() => {
            let entry = vi.registers.entry(name.to_ascii_lowercase()).or_default();
            if entry.linewise || linewise {
                if !entry.text.is_empty() {
                    entry.text.push('\n');
                }
                entry.linewise = true;
            }
            entry.text.push_str(text);
            register = entry.clone();
        }
        Some(name) if name != UNNAMED_REGISTER => {
            vi.registers.insert(name, register.clone());
        }
        _ => {}
    }
    vi.registers.insert(UNNAMED_REGISTER, register);
}

/// `d`, `c`, `y`, `g~`. From command mode this waits for a motion; typed again it
/// works on whole lines; in visual mode it takes the selection.
pub(super) fn operator_widget(reader: &mut LineReader, operator: ViOperator) -> WidgetResult {
    match reader.state.mode.mode() {
        EditMode::Visual => {
            let Some(range) = reader.state.active_region() else {
                return Ok(false);
            };
            let linewise = reader.state.region_type == RegionType::Line;
            apply_operator(reader, operator, range, linewise)
        }
        EditMode::ViOperatorPending => {
            let Some(pending) = reader.state.mode.finish_operator() else {
                return Ok(false);
            };
            if pending.operator != operator {
                return Ok(false);
            }
            let lines = usize::try_from(
                pending
                    .count
                    .saturating_mul(reader.state.argument.count())
                    .unsigned_abs(),
            )
            .unwrap_or(usize::MAX)
            .max(1);
            let range = lines_from(reader, pending.start, lines);
            reader.state.vi.selected_register = pending.register;
            apply_operator(reader, operator, range, true)
        }
        _ => {
            let pending = PendingOperator {
                operator,
                start: reader.state.buffer.cursor(),
                count: reader.state.argument.count(),
                register: reader.state.vi.selected_register.take(),
            };
            reader.state.mode.begin_operator(pending);
            Ok(true)
        }
    }
}

/// `count` whole lines starting with the one holding `pos`.
pub(super) fn lines_from(reader: &LineReader, pos: usize, count: usize) -> Range<usize> {
    let buffer = &reader.state.buffer;
    let mut last = pos;
    for _ in 1..count {
        let end = buffer.line_end(last);
        if end >= buffer.len() {
            break;
        }
        last = end + 1;
    }
    buffer.line_span(pos, last)
}

/// `Y` in some configurations: from the cursor to the end of the line.
pub(super) fn vi_yank_eol(reader: &mut LineReader) -> WidgetResult {
    let cursor = reader.state.buffer.cursor();
    let end = reader.state.buffer.line_end(cursor);
    apply_operator(reader, ViOperator::Yank, cursor..end, false)
}

pub(super) fn vi_yank_whole_line(reader: &mut LineReader) -> WidgetResult {
    let range = lines_from(reader, reader.state.buffer.cursor(), repeat_count(reader));
    apply_operator(reader, ViOperator::Yank, range, true)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{cursor, run, text, vi_reader};
    use super::*;
    use crate::WidgetName;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_operator_waits_for_motion() {
        let mut reader = vi_reader("abc", 1);
        reader.state.argument.set_count(2);
        assert!(run(&mut reader, WidgetName::ViDelete));
        assert_eq!(reader.state.mode.mode(), EditMode::ViOperatorPending);
        let pending = reader.state.mode.pending_operator.unwrap();
        assert_eq!((pending.operator, pending.start, pending.count), (ViOperator::Delete, 1, 2));
    }

    #[test]
    fn test_doubled_delete_removes_line() {
        let mut reader = vi_reader("one\n  two\nthree", 5);
        run(&mut reader, WidgetName::ViDelete);
        assert!(run(&mut reader, WidgetName::ViDelete));
        assert_eq!(text(&reader), "one\nthree");
        assert_eq!(cursor(&reader), 4);
        assert_eq!(
            reader.state.vi.registers[&UNNAMED_REGISTER],
            ViRegister {
                text: "  two".to_string(),
                linewise: true
            }
        );
    }

    #[test]
    fn test_doubled_yank_with_count_keeps_cursor() {
        let mut reader = vi_reader("a\nb\nc", 0);
        run(&mut reader, WidgetName::ViYank);
        reader.state.argument.set_count(2);
        assert!(run(&mut reader, WidgetName::ViYank));
        assert_eq!(text(&reader), "a\nb\nc");
        assert_eq!(cursor(&reader), 0);
        assert_eq!(reader.state.vi.registers[&UNNAMED_REGISTER].text, "a\nb");
    }

    #[test]
    fn test_mismatched_operator_cancels() {
        let mut reader = vi_reader("abc", 0);
        run(&mut reader, WidgetName::ViDelete);
        assert!(!run(&mut reader, WidgetName::ViYank));
        assert_eq!(reader.state.mode.mode(), EditMode::ViCommand);
        assert_eq!(text(&reader), "abc");
    }

    #[test]
    fn test_change_lines_leaves_empty_line() {
        let mut reader = vi_reader("one\ntwo\nthree", 4);
        run(&mut reader, WidgetName::ViChangeTo);
        assert!(run(&mut reader, WidgetName::ViChangeTo));
        assert_eq!(text(&reader), "one\n\nthree");
        assert_eq!(cursor(&reader), 4);
        assert_eq!(reader.state.mode.mode(), EditMode::ViInsert);

        let mut reader = vi_reader("one\ntwo", 5);
        run(&mut reader, WidgetName::ViChangeTo);
        run(&mut reader, WidgetName::ViChangeTo);
        assert_eq!(text(&reader), "one\n");
    }

    #[test]
    fn test_visual_yank_takes_selection() {
        let mut reader = vi_reader("abcdef", 0);
        reader.state.buffer.set_mark();
        reader.state.buffer.set_cursor(2);
        reader.state.region_type = RegionType::Char;
        reader.state.mode.set_mode(EditMode::Visual);
        assert!(run(&mut reader, WidgetName::ViYank));
        assert_eq!(reader.state.vi.registers[&UNNAMED_REGISTER].text, "abc");
        assert_eq!(cursor(&reader), 0);
    }

    #[test]
    fn test_swap_case_operator() {
        let mut reader = vi_reader("abc def", 4);
        apply_operator(&mut reader, ViOperator::SwapCase, 0..3, false).unwrap();
        assert_eq!(text(&reader), "ABC def");
        assert_eq!(cursor(&reader), 0);
    }

    #[test]
    fn test_uppercase_register_appends() {
        let mut reader = vi_reader("xy", 0);
        reader.state.vi.selected_register = Some('a');
        apply_operator(&mut reader, ViOperator::Yank, 0..1, false).unwrap();
        reader.state.vi.selected_register = Some('A');
        apply_operator(&mut reader, ViOperator::Yank, 1..2, false).unwrap();
        assert_eq!(reader.state.vi.registers[&'a'].text, "xy");
        assert_eq!(reader.state.vi.registers[&UNNAMED_REGISTER].text, "xy");
    }

    #[test]
    fn test_yank_to_end_and_whole_line() {
        let mut reader = vi_reader("hello world\nnext", 6);
        assert!(run(&mut reader, WidgetName::ViYankEol));
        assert_eq!(reader.state.vi.registers[&UNNAMED_REGISTER].text, "world");

        assert!(run(&mut reader, WidgetName::ViYankWholeLine));
        assert_eq!(
            reader.state.vi.registers[&UNNAMED_REGISTER],
            ViRegister {
                text: "hello world".to_string(),
                linewise: true
            }
        );
        assert_eq!(cursor(&reader), 6);
    }
}
