// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::{Buffer, Candidate, EditMode, KeySeq, KillRing, ModeController, NumericArgument,
            PromptTemplate, RegionType, SearchDirection, UndoCoalescing, UndoHistory,
            WidgetName};

/// Everything one [`crate::LineReader::read_line`] call edits. Built fresh at the start
/// of each call and dropped when it returns.
#[derive(Debug)]
pub(crate) struct EditState {
    pub buffer: Buffer,
    pub mode: ModeController,
    pub undo: UndoHistory,
    pub kill_ring: KillRing,
    pub argument: NumericArgument,
    /// How the span between mark and cursor is selected.
    pub region_type: RegionType,
    /// Keys that invoked the widget being run.
    pub keys: KeySeq,
    /// The built-in widget that ran before the current one.
    pub last_widget: Option<WidgetName>,
    /// Text shown below the buffer (listings, messages).
    pub post: Option<String>,
    /// Shown below the buffer while a nested prompt (search, named command) reads.
    pub minibuffer: Option<String>,
    pub search_term: Option<String>,
    /// Span inserted by the last `yank` / `yank-pop`.
    pub yanked: Option<Range<usize>>,
    /// The line being edited, parked while history entries are shown.
    pub history_saved_line: Option<String>,
    /// Pattern of a run of `history-search-*` / `history-beginning-search-*`.
    pub history_search_prefix: Option<String>,
    pub insert_last_word: Option<InsertLastWord>,
    /// Suffix added by completion that the next typed char may remove.
    pub completion_suffix: Option<String>,
    pub menu: Option<MenuState>,
    pub vi: ViState,
    pub prompt: PromptTemplate,
    pub right_prompt: Option<PromptTemplate>,
    pub mask: Option<char>,
    /// Hint from the last incomplete parse, for `%M`.
    pub missing: String,
    /// Set by `accept-line`, read (and reset) by the edit loop.
    pub accepted: bool,
    /// Widget name stored by `read-command`.
    pub reply: Option<String>,
    pub clear_screen: bool,
    pub recursive_edit_depth: usize,
    pub local_history: bool,
}

impl EditState {
    pub fn new(mode: EditMode, coalescing: UndoCoalescing) -> Self {
        Self {
            buffer: Buffer::new(),
            mode: ModeController::new(mode),
            undo: UndoHistory::new(coalescing),
            kill_ring: KillRing::new(),
            argument: NumericArgument::default(),
            region_type: RegionType::None,
            keys: KeySeq::new(),
            last_widget: None,
            post: None,
            minibuffer: None,
            search_term: None,
            yanked: None,
            history_saved_line: None,
            history_search_prefix: None,
            insert_last_word: None,
            completion_suffix: None,
            menu: None,
            vi: ViState::default(),
            prompt: PromptTemplate::default(),
            right_prompt: None,
            mask: None,
            missing: String::new(),
            accepted: false,
            reply: None,
            clear_screen: false,
            recursive_edit_depth: 0,
            local_history: false,
        }
    }

    /// The region, when one is active. Visual mode includes the char under the cursor.
    pub fn active_region(&self) -> Option<Range<usize>> {
        let inclusive = self.mode.mode() == EditMode::Visual;
        self.buffer.region_bounds(self.region_type, inclusive)
    }

    pub fn clear_region(&mut self) {
        self.region_type = RegionType::None;
        self.buffer.clear_mark();
    }
}

/// Where `insert-last-word` put its text, so the next press can replace it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InsertLastWord {
    pub history_index: usize,
    pub range: Range<usize>,
}

/// Candidates being cycled through in menu mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MenuState {
    pub candidates: Vec<Candidate>,
    pub selected: Option<usize>,
    /// Where the completed word starts.
    pub start: usize,
    /// Chars inserted for the current selection.
    pub inserted: usize,
}

/// A vi `f` / `F` / `t` / `T` to repeat with `;` and `,`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ViFind {
    pub target: char,
    pub forward: bool,
    /// `t` / `T`: stop one short of the target.
    pub till: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ViRegister {
    pub text: String,
    pub linewise: bool,
}

/// The unnamed register.
pub(crate) const UNNAMED_REGISTER: char = '"';

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ViState {
    pub last_find: Option<ViFind>,
    pub last_search: Option<(String, SearchDirection)>,
    pub registers: FxHashMap<char, ViRegister>,
    /// Register named with `"x`, used by the next yank, delete or put.
    pub selected_register: Option<char>,
    /// Keys of the last change, replayed by `.`.
    pub last_change: Option<KeySeq>,
    /// Keys of the change being made.
    pub recording: Option<KeySeq>,
    /// Count keys typed in command mode, so `.` replays `3x` and not `x`.
    pub argument_keys: KeySeq,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_visual_region_is_inclusive() {
        let mut state = EditState::new(EditMode::ViCommand, UndoCoalescing::default());
        state.buffer = Buffer::from_text("hello world");
        state.buffer.set_cursor(0);
        state.buffer.set_mark();
        state.buffer.set_cursor(4);
        state.region_type = RegionType::Char;
        assert_eq!(state.active_region(), Some(0..4));

        state.mode.set_mode(EditMode::Visual);
        assert_eq!(state.active_region(), Some(0..5));

        state.clear_region();
        assert_eq!(state.active_region(), None);
    }
}
