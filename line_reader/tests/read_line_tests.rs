// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end runs of [`LineReader::read_line`] against scripted keys and a mock
//! terminal.

use pretty_assertions::assert_eq;
use r3bl_line_reader::{Binding, KeyPress, LineReader, LineReaderConfig, LineReaderOption,
                       MemoryHistory, OutputDevice, ReadlineEvent, ScriptedInput,
                       ScriptedKeySource, StdoutMock, StringsCompleter, keymap_names,
                       variable_names};
use test_case::test_case;

fn reader_for(source: ScriptedKeySource) -> (LineReader, StdoutMock) {
    let (output, stdout_mock) = OutputDevice::new_mock();
    let reader = LineReader::builder()
        .set_key_source(source.with_width(80))
        .set_output_device(output)
        .build()
        .unwrap();
    (reader, stdout_mock)
}

fn read(reader: &mut LineReader) -> ReadlineEvent {
    reader.read_line(Some("> "), None, None, None).unwrap()
}

fn line(text: &str) -> ReadlineEvent { ReadlineEvent::Line(text.to_string()) }

#[test_case("hello\r", "hello" ; "plain typing")]
#[test_case("hellp\x08o\r", "hello" ; "backspace")]
#[test_case("world\x01hello \r", "hello world" ; "beginning of line")]
#[test_case("abc def\x17\r", "abc " ; "backward kill word")]
#[test_case("abc def\x17\x1f\r", "abc def" ; "undo restores the kill")]
#[test_case("ab\x14\r", "ba" ; "transpose at end")]
#[test_case("abc\x17\x1fx\x1f\r", "abc" ; "undo after undo then edit")]
fn test_emacs_editing(keys: &str, expected: &str) {
    let (mut reader, _) = reader_for(ScriptedKeySource::from_text(keys));
    assert_eq!(read(&mut reader), line(expected));
}

#[test]
fn test_yank_and_yank_pop() {
    let mut source = ScriptedKeySource::from_text("aaa\x15bbb\x15\x19");
    source.push_key(KeyPress::alt('y'));
    source.push_text("\r");
    let (mut reader, _) = reader_for(source);
    assert_eq!(read(&mut reader), line("aaa"));
}

#[test]
fn test_numeric_argument_repeats_kill_word() {
    let mut source = ScriptedKeySource::from_text("one two three four\x01");
    source.push_key(KeyPress::alt('3'));
    source.push_key(KeyPress::alt('d'));
    source.push_text("\r");
    let (mut reader, _) = reader_for(source);
    assert_eq!(read(&mut reader), line(" four"));
}

#[test]
fn test_ctrl_c_interrupts_with_partial_line() {
    let (mut reader, _) = reader_for(ScriptedKeySource::from_text("abc\x03"));
    assert_eq!(read(&mut reader), ReadlineEvent::Interrupted {
        partial_line: "abc".to_string()
    });
    assert_eq!(reader.history().len(), 0);
}

#[test]
fn test_ctrl_c_interrupts_pending_vi_operator() {
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("abc\x1bd\x03x\r").with_width(80))
        .set_output_device(output)
        .set_variable(variable_names::EDITING_MODE, "vi")
        .build()
        .unwrap();
    assert_eq!(read(&mut reader), ReadlineEvent::Interrupted {
        partial_line: "abc".to_string()
    });
}

#[test]
fn test_end_of_input() {
    let (mut reader, _) = reader_for(ScriptedKeySource::from_text("\x04"));
    assert_eq!(read(&mut reader), ReadlineEvent::Eof);

    // Input that runs out mid line hands back what was typed.
    let (mut reader, _) = reader_for(ScriptedKeySource::from_text("partial"));
    assert_eq!(read(&mut reader), line("partial"));
    assert_eq!(read(&mut reader), ReadlineEvent::Eof);
}

#[test]
fn test_consecutive_reads_fill_history() {
    let (mut reader, _) = reader_for(ScriptedKeySource::from_text("one\rtwo\r\x10\x10\r"));
    assert_eq!(read(&mut reader), line("one"));
    assert_eq!(read(&mut reader), line("two"));
    assert_eq!(read(&mut reader), line("one"));
    assert_eq!(reader.history().len(), 3);
}

#[test]
fn test_history_collaborator() {
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("\x10\x10\x0e\r").with_width(80))
        .set_output_device(output)
        .set_history(MemoryHistory::from_lines(&["ls -l", "git status"]))
        .build()
        .unwrap();
    assert_eq!(read(&mut reader), line("git status"));
}

#[test]
fn test_completion() {
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("git st\t\r").with_width(80))
        .set_output_device(output)
        .set_completer(StringsCompleter::new(&["status", "show"]))
        .build()
        .unwrap();
    assert_eq!(read(&mut reader), line("git status "));
}

#[test]
fn test_menu_completion_cycles_then_enter_keeps_selection() {
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("git s\t\t\t\r\r").with_width(80))
        .set_output_device(output)
        .set_completer(StringsCompleter::new(&["status", "show"]))
        .build()
        .unwrap();
    // The first Enter closes the menu, the second accepts.
    assert_eq!(read(&mut reader), line("git show "));
}

#[test]
fn test_vi_visual_delete() {
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("foo bar baz\x1b0ved\r").with_width(80))
        .set_output_device(output)
        .set_variable(variable_names::EDITING_MODE, "vi")
        .build()
        .unwrap();
    assert_eq!(read(&mut reader), line(" bar baz"));
}

#[test]
fn test_vi_change_word_and_repeat() {
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("a b c\x1b0cwx\x1bww.\r").with_width(80))
        .set_output_device(output)
        .set_variable(variable_names::EDITING_MODE, "vi")
        .build()
        .unwrap();
    assert_eq!(read(&mut reader), line("x b x"));
}

#[test]
fn test_ambiguous_binding_resolution() {
    let config = LineReaderConfig::from_json_str(
        r#"{
            "editing-mode": "vi",
            "bindings": [ { "keymap": "viins", "keys": "jk", "widget": "vi-cmd-mode" } ]
        }"#,
    )
    .unwrap();

    // `jk` leaves insert mode, so `x` deletes the char under the cursor.
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("abjkx\r").with_width(80))
        .set_output_device(output)
        .set_config(config.clone())
        .build()
        .unwrap();
    assert_eq!(read(&mut reader), line("a"));

    // `j` followed by anything else is just typed.
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("just\r").with_width(80))
        .set_output_device(output)
        .set_config(config.clone())
        .build()
        .unwrap();
    assert_eq!(read(&mut reader), line("just"));

    // A pause after `j` commits it before `k` arrives.
    let mut script = vec![ScriptedInput::Key(KeyPress::ch('j')), ScriptedInput::Pause];
    script.extend("k\r".chars().map(|ch| ScriptedInput::Key(KeyPress::ch(ch))));
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::new(script).with_width(80))
        .set_output_device(output)
        .set_config(config)
        .build()
        .unwrap();
    assert_eq!(read(&mut reader), line("jk"));
}

#[test]
fn test_user_widget_bound_in_main() {
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("shout\x18y\r").with_width(80))
        .set_output_device(output)
        .set_widget("upcase-buffer", |reader| {
            let text = reader.buffer().text().to_uppercase();
            reader.buffer_mut().replace_all(&text);
            Ok(true)
        })
        .build()
        .unwrap();
    reader
        .keymaps_mut()
        .get_or_create(keymap_names::MAIN)
        .bind_str("^Xy", Binding::widget("upcase-buffer"))
        .unwrap();
    assert_eq!(read(&mut reader), line("SHOUT"));
}

#[test]
fn test_prompt_and_right_prompt_are_drawn() {
    let (mut reader, stdout_mock) = reader_for(ScriptedKeySource::from_text("ls\r"));
    let event = reader
        .read_line(Some("%N%% "), Some("[rp]"), None, None)
        .unwrap();
    assert_eq!(event, line("ls"));
    let screen = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(screen.contains("1% ls"), "{screen:?}");
    assert!(screen.contains("[rp]"), "{screen:?}");
}

#[test]
fn test_masked_input_is_not_echoed_or_remembered() {
    let (mut reader, stdout_mock) = reader_for(ScriptedKeySource::from_text("secret\r"));
    let event = reader
        .read_line(Some("password: "), None, Some('*'), None)
        .unwrap();
    assert_eq!(event, line("secret"));
    let screen = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(screen.contains("******"), "{screen:?}");
    assert!(!screen.contains("secret"), "{screen:?}");
    assert_eq!(reader.history().len(), 0);
}

#[test]
fn test_initial_buffer_and_history_options() {
    let (output, _) = OutputDevice::new_mock();
    let mut reader = LineReader::builder()
        .set_key_source(ScriptedKeySource::from_text("\r\r").with_width(80))
        .set_output_device(output)
        .set_option(LineReaderOption::HistoryIgnoreDups, true)
        .build()
        .unwrap();
    assert_eq!(
        reader.read_line(None, None, None, Some("echo hi")).unwrap(),
        line("echo hi")
    );
    assert_eq!(
        reader.read_line(None, None, None, Some("echo hi")).unwrap(),
        line("echo hi")
    );
    assert_eq!(reader.history().len(), 1);
}
