// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The built-in widgets. Each one edits [`LineReader`] state and returns
//! [`WidgetResult`]; `Ok(false)` rings the bell. Mode changes that only depend on the
//! (mode, widget) pair are made by the dispatcher from [`crate::MODE_TRANSITIONS`],
//! not here.

// Attach.
mod argument;
mod case_change;
mod completion;
mod editing;
mod history_nav;
mod isearch;
mod kill_yank;
mod misc;
mod motion;
mod vi_mode;
mod vi_operator;

// Re-export.
pub(crate) use vi_operator::apply_operator;

use crate::{LineReader, SearchDirection, SearchKind, ViOperator, WidgetName, WidgetResult,
            variable_names, DEFAULT_WORDCHARS};

/// Run the built-in `widget`.
pub(crate) fn call_builtin(reader: &mut LineReader, widget: WidgetName) -> WidgetResult {
    use SearchDirection::{Backward, Forward};
    use WidgetName as W;

    match widget {
        W::CallbackInit | W::CallbackFinish | W::CallbackKeymap => Ok(true),

        // Motions.
        W::ForwardChar => motion::forward_char(reader),
        W::BackwardChar => motion::backward_char(reader),
        W::ViForwardChar => motion::vi_forward_char(reader),
        W::ViBackwardChar => motion::vi_backward_char(reader),
        W::ForwardWord => motion::forward_word(reader),
        W::EmacsForwardWord => motion::emacs_forward_word(reader),
        W::BackwardWord | W::EmacsBackwardWord => motion::backward_word(reader),
        W::BeginningOfLine => motion::beginning_of_line(reader),
        W::EndOfLine => motion::end_of_line(reader),
        W::ViBeginningOfLine => motion::vi_beginning_of_line(reader),
        W::ViEndOfLine => motion::vi_end_of_line(reader),
        W::ViFirstNonBlank => motion::vi_first_non_blank(reader),
        W::ViGotoColumn => motion::vi_goto_column(reader),
        W::ViForwardWord => motion::vi_forward_word(reader, false),
        W::ViForwardBlankWord => motion::vi_forward_word(reader, true),
        W::ViBackwardWord => motion::vi_backward_word(reader, false),
        W::ViBackwardBlankWord => motion::vi_backward_word(reader, true),
        W::ViForwardWordEnd => motion::vi_forward_word_end(reader, false),
        W::ViForwardBlankWordEnd => motion::vi_forward_word_end(reader, true),
        W::ViBackwardWordEnd => motion::vi_backward_word_end(reader, false),
        W::ViBackwardBlankWordEnd => motion::vi_backward_word_end(reader, true),
        W::ViMatchBracket => motion::vi_match_bracket(reader),
        W::ViFindNextChar => motion::vi_find(reader, true, false),
        W::ViFindNextCharSkip => motion::vi_find(reader, true, true),
        W::ViFindPrevChar => motion::vi_find(reader, false, false),
        W::ViFindPrevCharSkip => motion::vi_find(reader, false, true),
        W::ViRepeatFind => motion::vi_repeat_find(reader, false),
        W::ViRevRepeatFind => motion::vi_repeat_find(reader, true),
        W::CharacterSearch => motion::character_search(reader, true),
        W::CharacterSearchBackward => motion::character_search(reader, false),
        W::SetMarkCommand => motion::set_mark_command(reader),
        W::ExchangePointAndMark => motion::exchange_point_and_mark(reader),

        // Inserting and deleting.
        W::SelfInsert => editing::self_insert(reader),
        W::SelfInsertUnmeta => editing::self_insert_unmeta(reader),
        W::MagicSpace => editing::magic_space(reader),
        W::InsertCloseParen => editing::insert_close(reader, ')'),
        W::InsertCloseSquare => editing::insert_close(reader, ']'),
        W::InsertCloseCurly => editing::insert_close(reader, '}'),
        W::BackwardDeleteChar => editing::backward_delete_char(reader),
        W::DeleteChar => editing::delete_char(reader),
        W::BackwardDeleteWord => editing::backward_delete_word(reader),
        W::DeleteWord => editing::delete_word(reader),
        W::ViBackwardDeleteChar => editing::vi_backward_delete_char(reader),
        W::ViDeleteChar => editing::vi_delete_char(reader),
        W::TransposeChars => editing::transpose_chars(reader),
        W::TransposeWords => editing::transpose_words(reader),
        W::OverwriteMode => editing::overwrite_mode(reader),
        W::QuotedInsert | W::ViQuotedInsert => editing::quoted_insert(reader),
        W::InsertComment => editing::insert_comment(reader, false),
        W::ViInsertComment => editing::insert_comment(reader, true),
        W::CopyPrevWord => editing::copy_prev_word(reader),
        W::Undo | W::ViUndoChange => editing::undo(reader),
        W::Redo => editing::redo(reader),
        W::SplitUndo => editing::split_undo(reader),

        // Case.
        W::CapitalizeWord => case_change::capitalize_word(reader),
        W::UpCaseWord => case_change::up_case_word(reader),
        W::DownCaseWord => case_change::down_case_word(reader),
        W::ViSwapCase => case_change::vi_swap_case(reader),

        // Kill ring, registers.
        W::KillLine => kill_yank::kill_line(reader),
        W::BackwardKillLine => kill_yank::backward_kill_line(reader),
        W::KillWholeLine => kill_yank::kill_whole_line(reader),
        W::KillWord => kill_yank::kill_word(reader),
        W::BackwardKillWord => kill_yank::backward_kill_word(reader),
        W::KillRegion => kill_yank::kill_region(reader),
        W::CopyRegionAsKill => kill_yank::copy_region_as_kill(reader),
        W::KillBuffer => kill_yank::kill_buffer(reader),
        W::ViKillLine => kill_yank::vi_kill_line(reader),
        W::ViKillEol => kill_yank::vi_kill_eol(reader),
        W::ViBackwardKillWord => kill_yank::vi_backward_kill_word(reader),
        W::Yank => kill_yank::yank(reader),
        W::YankPop => kill_yank::yank_pop(reader),
        W::ViPutAfter => kill_yank::vi_put(reader, true),
        W::ViPutBefore => kill_yank::vi_put(reader, false),
        W::PutReplaceSelection => kill_yank::put_replace_selection(reader),

        // History.
        W::UpHistory => history_nav::up_history(reader),
        W::DownHistory => history_nav::down_history(reader),
        W::UpLine => history_nav::up_line(reader),
        W::DownLine => history_nav::down_line(reader),
        W::UpLineOrHistory => history_nav::up_line_or_history(reader),
        W::DownLineOrHistory => history_nav::down_line_or_history(reader),
        W::ViUpLineOrHistory => history_nav::vi_up_line_or_history(reader),
        W::ViDownLineOrHistory => history_nav::vi_down_line_or_history(reader),
        W::UpLineOrSearch => history_nav::up_line_or_search(reader),
        W::DownLineOrSearch => history_nav::down_line_or_search(reader),
        W::BeginningOfHistory => history_nav::beginning_of_history(reader),
        W::EndOfHistory => history_nav::end_of_history(reader),
        W::BeginningOfBufferOrHistory => history_nav::beginning_of_buffer_or_history(reader),
        W::EndOfBufferOrHistory => history_nav::end_of_buffer_or_history(reader),
        W::BeginningOfLineHist => history_nav::beginning_of_line_hist(reader),
        W::EndOfLineHist => history_nav::end_of_line_hist(reader),
        W::HistorySearchBackward => history_nav::history_search(reader, Backward, false),
        W::HistorySearchForward => history_nav::history_search(reader, Forward, false),
        W::HistoryBeginningSearchBackward => history_nav::history_search(reader, Backward, true),
        W::HistoryBeginningSearchForward => history_nav::history_search(reader, Forward, true),
        W::ViHistorySearchBackward => history_nav::vi_history_search(reader, Backward),
        W::ViHistorySearchForward => history_nav::vi_history_search(reader, Forward),
        W::ViRepeatSearch => history_nav::vi_repeat_search(reader, false),
        W::ViRevRepeatSearch => history_nav::vi_repeat_search(reader, true),
        W::ViFetchHistory => history_nav::vi_fetch_history(reader),
        W::InferNextHistory => history_nav::infer_next_history(reader),
        W::InsertLastWord => history_nav::insert_last_word(reader),
        W::SetLocalHistory => history_nav::set_local_history(reader),
        W::HistoryIncrementalSearchBackward => {
            isearch::incremental_search(reader, Backward, SearchKind::Substring)
        }
        W::HistoryIncrementalSearchForward => {
            isearch::incremental_search(reader, Forward, SearchKind::Substring)
        }
        W::HistoryIncrementalPatternSearchBackward => {
            isearch::incremental_search(reader, Backward, SearchKind::Glob)
        }
        W::HistoryIncrementalPatternSearchForward => {
            isearch::incremental_search(reader, Forward, SearchKind::Glob)
        }

        // Completion and expansion.
        W::CompleteWord => completion::complete_word(reader),
        W::CompletePrefix => completion::complete_prefix(reader),
        W::ExpandOrComplete => completion::expand_or_complete(reader, false),
        W::ExpandOrCompletePrefix => completion::expand_or_complete(reader, true),
        W::MenuComplete | W::MenuSelect => completion::menu_complete(reader, true),
        W::ReverseMenuComplete => completion::menu_complete(reader, false),
        W::MenuExpandOrComplete => completion::menu_expand_or_complete(reader),
        W::ListChoices => completion::list_choices(reader),
        W::DeleteCharOrList => completion::delete_char_or_list(reader),
        W::ListExpand => completion::list_expand(reader),
        W::ExpandWord => completion::expand_word(reader),
        W::ExpandHistory => completion::expand_history(reader),
        W::SpellWord => completion::spell_word(reader),

        // Vi modes.
        W::ViCmdMode => vi_mode::vi_cmd_mode(reader),
        W::EmacsEditingMode => vi_mode::emacs_editing_mode(reader),
        W::ViInsert => vi_mode::vi_insert(reader),
        W::ViAddNext => vi_mode::vi_add_next(reader),
        W::ViAddEol => vi_mode::vi_add_eol(reader),
        W::ViInsertBol => vi_mode::vi_insert_bol(reader),
        W::ViOpenLineAbove => vi_mode::vi_open_line(reader, true),
        W::ViOpenLineBelow => vi_mode::vi_open_line(reader, false),
        W::ViSubstitute => vi_mode::vi_substitute(reader),
        W::ViChangeEol => vi_mode::vi_change_eol(reader),
        W::ViChangeWholeLine => vi_mode::vi_change_whole_line(reader),
        W::ViReplace => vi_mode::vi_replace(reader),
        W::ViReplaceChars => vi_mode::vi_replace_chars(reader),
        W::ViJoin => vi_mode::vi_join(reader),
        W::VisualMode => vi_mode::visual_mode(reader, crate::RegionType::Char),
        W::VisualLineMode => vi_mode::visual_mode(reader, crate::RegionType::Line),
        W::ViRepeatChange => vi_mode::vi_repeat_change(reader),
        W::ViSetBuffer => vi_mode::vi_set_buffer(reader),

        // Vi operators.
        W::ViDelete => vi_operator::operator_widget(reader, ViOperator::Delete),
        W::ViChangeTo => vi_operator::operator_widget(reader, ViOperator::Change),
        W::ViYank => vi_operator::operator_widget(reader, ViOperator::Yank),
        W::ViOperSwapCase => vi_operator::operator_widget(reader, ViOperator::SwapCase),
        W::ViYankEol => vi_operator::vi_yank_eol(reader),
        W::ViYankWholeLine => vi_operator::vi_yank_whole_line(reader),

        // Numeric argument.
        W::DigitArgument => argument::digit_argument(reader),
        W::NegArgument => argument::neg_argument(reader),
        W::UniversalArgument => argument::universal_argument(reader),
        W::ArgumentBase => argument::argument_base(reader),
        W::ViDigitOrBeginningOfLine => argument::vi_digit_or_beginning_of_line(reader),

        // Everything else.
        W::AcceptLine => misc::accept_line(reader),
        W::Abort => misc::abort(reader),
        W::Beep => misc::beep(reader),
        W::UndefinedKey => Ok(false),
        W::ClearScreen => misc::clear_screen(reader),
        W::Redisplay | W::RedrawLine => misc::redisplay(reader),
        W::ExecuteNamedCmd => misc::execute_named_cmd(reader),
        W::ReadCommand => misc::read_command(reader),
        W::RecursiveEdit => misc::recursive_edit(reader),
        W::WhatCursorPosition => misc::what_cursor_position(reader),
        W::DoLowercaseVersion => misc::do_lowercase_version(reader),
        W::Mouse => misc::mouse(reader),
    }
}

/// The numeric argument for the widget being run.
fn count(reader: &LineReader) -> i32 { reader.state.argument.count() }

/// How many times to repeat: the size of the count, at least once.
fn repeat_count(reader: &LineReader) -> usize {
    usize::try_from(count(reader).unsigned_abs())
        .unwrap_or(usize::MAX)
        .max(1)
}

/// Chars that emacs word motions treat as part of a word, besides alphanumerics.
fn wordchars(reader: &LineReader) -> String {
    reader
        .variables
        .get_string(variable_names::WORDCHARS, DEFAULT_WORDCHARS)
}

#[cfg(test)]
mod test_support {
    use crate::{Buffer, EditMode, KeyPress, KeySeq, LineReader, OutputDevice,
                ScriptedKeySource, WidgetName};

    /// A reader with `text` in the buffer and the cursor at `cursor`. `keys` are what
    /// widgets read directly (the char after `f`, a search term).
    pub(super) fn reader_with_keys(text: &str, cursor: usize, keys: &str) -> LineReader {
        let (output, _stdout_mock) = OutputDevice::new_mock();
        let mut reader = LineReader::builder()
            .set_key_source(ScriptedKeySource::from_text(keys).with_width(80))
            .set_output_device(output)
            .build()
            .unwrap();
        reader.state.buffer = Buffer::from_text(text);
        reader.state.buffer.set_cursor(cursor);
        reader
    }

    pub(super) fn reader_with(text: &str, cursor: usize) -> LineReader {
        reader_with_keys(text, cursor, "")
    }

    pub(super) fn vi_reader(text: &str, cursor: usize) -> LineReader {
        let mut reader = reader_with(text, cursor);
        reader.state.mode.set_mode(EditMode::ViCommand);
        reader
    }

    pub(super) fn run(reader: &mut LineReader, widget: WidgetName) -> bool {
        super::call_builtin(reader, widget).unwrap()
    }

    /// Pretend `key` invoked the next widget.
    pub(super) fn typed(reader: &mut LineReader, key: KeyPress) {
        reader.state.keys = KeySeq::from_slice(&[key]);
    }

    pub(super) fn text(reader: &LineReader) -> String { reader.state.buffer.text() }

    pub(super) fn cursor(reader: &LineReader) -> usize { reader.state.buffer.cursor() }
}
