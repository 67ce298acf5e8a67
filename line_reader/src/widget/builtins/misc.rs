// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum::IntoEnumIterator;

use crate::{Binding, EditMode, KeyPress, LineReader, LineReaderOption, ParseContext,
            ParseError, Resolution, Unwind, WidgetName, WidgetRef, WidgetResult, next_mode,
            render_char};

/// Accept the line, unless the parser says it continues (an open quote, a trailing
/// `\`), in which case a newline is added and editing goes on. History references
/// are expanded first; with `HISTORY_VERIFY` the expanded line is shown again instead
/// of being accepted. In the menu this only accepts the selected candidate.
pub(super) fn accept_line(reader: &mut LineReader) -> WidgetResult {
    if reader.state.mode.mode() == EditMode::Menu {
        reader.close_menu();
        return Ok(true);
    }

    let text = reader.state.buffer.text();
    let cursor = reader.state.buffer.cursor();
    if let Err(ParseError::Incomplete { missing }) =
        reader.parser.parse(&text, cursor, ParseContext::AcceptLine)
    {
        tracing::debug!(message = "line continues", missing = %missing);
        reader.state.missing = missing;
        let buffer = &mut reader.state.buffer;
        buffer.set_cursor(buffer.len());
        buffer.insert_char('\n');
        return Ok(true);
    }

    let expand = reader.state.mask.is_none()
        && !reader.is_set(LineReaderOption::DisableEventExpansion);
    if expand {
        match reader
            .expander
            .expand_history(reader.history.as_ref(), &text)
        {
            Err(error) => {
                tracing::debug!(message = "history expansion failed", %error);
                reader.state.post = Some(error.to_string());
                return Ok(false);
            }
            Ok(expanded) if expanded != text => {
                reader.state.buffer.replace_all(&expanded);
                if reader.is_set(LineReaderOption::HistoryVerify) {
                    return Ok(true);
                }
            }
            Ok(_) => {}
        }
    }

    reader.state.missing.clear();
    reader.state.accepted = true;
    Ok(true)
}

/// `^C` interrupts the read. Other keys bound here leave a recursive edit, or throw
/// the line away.
pub(super) fn abort(reader: &mut LineReader) -> WidgetResult {
    if reader.state.keys.last() == Some(&KeyPress::ctrl('c')) {
        return Err(Unwind::Interrupted);
    }
    if reader.state.recursive_edit_depth > 0 {
        reader.state.accepted = true;
        return Ok(false);
    }
    reader.state.buffer.clear();
    reader.state.clear_region();
    Ok(false)
}

pub(super) fn beep(reader: &mut LineReader) -> WidgetResult {
    reader.beep()?;
    Ok(true)
}

pub(super) fn clear_screen(reader: &mut LineReader) -> WidgetResult {
    reader.state.clear_screen = true;
    reader.redisplay()?;
    Ok(true)
}

pub(super) fn redisplay(reader: &mut LineReader) -> WidgetResult {
    reader.redisplay()?;
    Ok(true)
}

/// Names `execute-named-cmd` accepts: the built-ins and registered user widgets.
fn widget_names(reader: &LineReader) -> Vec<String> {
    let mut names: Vec<String> = WidgetName::iter()
        .filter(|widget| !widget.is_callback())
        .map(|widget| widget.name().to_string())
        .chain(reader.widgets.names().into_iter().map(ToString::to_string))
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Read a widget name below the buffer (Tab completes it) and run that widget.
pub(super) fn execute_named_cmd(reader: &mut LineReader) -> WidgetResult {
    let names = widget_names(reader);
    let completions: Vec<&str> = names.iter().map(String::as_str).collect();
    let Some(name) = reader.read_minibuffer("execute: ", &completions)? else {
        return Ok(true);
    };
    let name = name.trim();
    if !names.iter().any(|it| it == name) {
        reader.state.post = Some(format!("No such widget `{name}'"));
        return Ok(false);
    }

    let mode = reader.state.mode.mode();
    let widget = WidgetRef::from_name(name);
    tracing::debug!(message = "execute named widget", widget = %widget);
    let succeeded = reader.invoke(&widget)?;
    if succeeded
        && let Some(builtin) = widget.builtin()
        && let Some(next) = next_mode(mode, builtin)
    {
        reader.state.mode.set_mode(next);
    }
    Ok(succeeded)
}

/// Read one key binding and store the name of its widget for [`LineReader::reply`].
pub(super) fn read_command(reader: &mut LineReader) -> WidgetResult {
    match reader.read_binding()? {
        Resolution::Bound { binding, .. } => {
            let name = match binding {
                Binding::Widget(widget) => widget.name().to_string(),
                Binding::Insert(_) => WidgetName::SelfInsert.name().to_string(),
                Binding::Unbound => WidgetName::UndefinedKey.name().to_string(),
            };
            reader.state.reply = Some(name);
            Ok(true)
        }
        Resolution::Unmatched { .. } => {
            reader.state.reply = None;
            Ok(false)
        }
        Resolution::EndOfInput => Err(Unwind::EndOfInput),
    }
}

/// Edit in a nested loop until a line is accepted, then carry on with the outer one.
pub(super) fn recursive_edit(reader: &mut LineReader) -> WidgetResult {
    reader.state.recursive_edit_depth += 1;
    tracing::debug!(message = "recursive edit", depth = reader.state.recursive_edit_depth);
    let outcome = reader.edit_loop();
    reader.state.recursive_edit_depth -= 1;
    outcome.map(|()| true)
}

pub(super) fn what_cursor_position(reader: &mut LineReader) -> WidgetResult {
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let len = buffer.len();
    let (_, column) = buffer.cursor_line_col();
    let char_info = match buffer.current_char() {
        Some(ch) => {
            let code = u32::from(ch);
            format!("{} (0o{code:o}, {code}, 0x{code:x})", render_char(ch))
        }
        None => "EOF".to_string(),
    };
    reader.state.post = Some(format!(
        "Char: {char_info}  point {cursor} of {len}  column {column}"
    ));
    Ok(true)
}

/// Read the key again as its lowercase version.
pub(super) fn do_lowercase_version(reader: &mut LineReader) -> WidgetResult {
    match reader.state.keys.last().and_then(KeyPress::to_lowercase) {
        Some(key) => {
            reader.input.push_front_keys(&[key]);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Mouse reports are only taken when `MOUSE` is set.
pub(super) fn mouse(reader: &mut LineReader) -> WidgetResult {
    Ok(reader.is_set(LineReaderOption::Mouse))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{cursor, reader_with, reader_with_keys, run, text, typed};
    use crate::{EditMode, KeyPress, LineReaderOption, MemoryHistory, Unwind, WidgetName,
                call_builtin};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accept_line() {
        let mut reader = reader_with("ls", 1);
        assert!(run(&mut reader, WidgetName::AcceptLine));
        assert!(reader.state.accepted);
        assert_eq!(text(&reader), "ls");
    }

    #[test]
    fn test_open_quote_continues_the_line() {
        let mut reader = reader_with("echo 'abc", 2);
        assert!(run(&mut reader, WidgetName::AcceptLine));
        assert!(!reader.state.accepted);
        assert_eq!(text(&reader), "echo 'abc\n");
        assert_eq!(reader.state.missing, "quote");
    }

    #[test]
    fn test_history_expansion_on_accept() {
        let mut reader = reader_with("sudo !!", 7);
        reader.history = Box::new(MemoryHistory::from_lines(&["make install"]));
        assert!(run(&mut reader, WidgetName::AcceptLine));
        assert!(reader.state.accepted);
        assert_eq!(text(&reader), "sudo make install");

        let mut reader = reader_with("sudo !!", 7);
        reader.history = Box::new(MemoryHistory::from_lines(&["make install"]));
        reader.options_mut().set(LineReaderOption::HistoryVerify);
        assert!(run(&mut reader, WidgetName::AcceptLine));
        assert!(!reader.state.accepted);
        assert_eq!(text(&reader), "sudo make install");

        let mut reader = reader_with("!nope", 5);
        assert!(!run(&mut reader, WidgetName::AcceptLine));
        assert!(!reader.state.accepted);
        assert_eq!(reader.state.post.as_deref(), Some("!nope: event not found"));
    }

    #[test]
    fn test_masked_lines_are_not_expanded() {
        let mut reader = reader_with("pa!!word", 8);
        reader.state.mask = Some('*');
        assert!(run(&mut reader, WidgetName::AcceptLine));
        assert_eq!(text(&reader), "pa!!word");
    }

    #[test]
    fn test_accept_in_menu_keeps_editing() {
        let mut reader = reader_with("git status ", 11);
        reader.state.mode.set_mode(EditMode::Menu);
        assert!(run(&mut reader, WidgetName::AcceptLine));
        assert!(!reader.state.accepted);
        assert_eq!(reader.state.mode.mode(), EditMode::Emacs);
    }

    #[test]
    fn test_abort() {
        let mut reader = reader_with("draft", 5);
        typed(&mut reader, KeyPress::ctrl('c'));
        let result = call_builtin(&mut reader, WidgetName::Abort);
        assert!(matches!(result, Err(Unwind::Interrupted)));

        let mut reader = reader_with("draft", 5);
        typed(&mut reader, KeyPress::ctrl('g'));
        assert!(!run(&mut reader, WidgetName::Abort));
        assert_eq!(text(&reader), "");
    }

    #[test]
    fn test_execute_named_cmd() {
        let mut reader = reader_with_keys("abc", 0, "end-of-l\t\r");
        assert!(run(&mut reader, WidgetName::ExecuteNamedCmd));
        assert_eq!(cursor(&reader), 3);
        assert_eq!(reader.state.minibuffer, None);

        let mut reader = reader_with_keys("abc", 0, "nope\r");
        assert!(!run(&mut reader, WidgetName::ExecuteNamedCmd));
        assert_eq!(reader.state.post.as_deref(), Some("No such widget `nope'"));
    }

    #[test]
    fn test_execute_named_cmd_changes_mode() {
        let mut reader = reader_with_keys("abc", 0, "vi-add-eol\r");
        reader.state.mode.set_mode(EditMode::ViCommand);
        assert!(run(&mut reader, WidgetName::ExecuteNamedCmd));
        assert_eq!(reader.state.mode.mode(), EditMode::ViInsert);
        assert_eq!(cursor(&reader), 3);
    }

    #[test]
    fn test_read_command_stores_reply() {
        let mut reader = reader_with_keys("", 0, "\x01");
        assert!(run(&mut reader, WidgetName::ReadCommand));
        assert_eq!(reader.reply(), Some("beginning-of-line"));
    }

    #[test]
    fn test_recursive_edit_returns_on_accept() {
        let mut reader = reader_with_keys("", 0, "hi\r");
        assert!(run(&mut reader, WidgetName::RecursiveEdit));
        assert_eq!(text(&reader), "hi");
        assert_eq!(reader.state.recursive_edit_depth, 0);
    }

    #[test]
    fn test_what_cursor_position() {
        let mut reader = reader_with("ab\ncd", 4);
        assert!(run(&mut reader, WidgetName::WhatCursorPosition));
        assert_eq!(
            reader.state.post.as_deref(),
            Some("Char: d (0o144, 100, 0x64)  point 4 of 5  column 1")
        );

        let mut reader = reader_with("ab", 2);
        run(&mut reader, WidgetName::WhatCursorPosition);
        assert_eq!(
            reader.state.post.as_deref(),
            Some("Char: EOF  point 2 of 2  column 2")
        );
    }

    #[test]
    fn test_do_lowercase_version() {
        let mut reader = reader_with("", 0);
        typed(&mut reader, KeyPress::alt('X'));
        assert!(run(&mut reader, WidgetName::DoLowercaseVersion));
        assert_eq!(reader.read_key().unwrap(), KeyPress::alt('x'));

        typed(&mut reader, KeyPress::alt('x'));
        assert!(!run(&mut reader, WidgetName::DoLowercaseVersion));
    }

    #[test]
    fn test_mouse_needs_option() {
        let mut reader = reader_with("", 0);
        assert!(!run(&mut reader, WidgetName::Mouse));
        reader.options_mut().set(LineReaderOption::Mouse);
        assert!(run(&mut reader, WidgetName::Mouse));
    }

    #[test]
    fn test_clear_screen_and_beep() {
        let mut reader = reader_with("", 0);
        assert!(run(&mut reader, WidgetName::ClearScreen));
        assert!(!reader.state.clear_screen);
        assert!(run(&mut reader, WidgetName::Beep));
        assert_eq!(reader.bell_count(), 1);
    }
}
