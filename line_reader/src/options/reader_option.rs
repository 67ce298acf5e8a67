// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

/// Feature toggles read by widgets. Each has a compiled-in default
/// ([`LineReaderOption::default_value`]); [`Options`] stores the overrides.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineReaderOption {
    /// Complete using the text on both sides of the cursor.
    CompleteInWord,
    /// Don't expand `!` history references on accept.
    DisableEventExpansion,
    /// After history expansion, put the line back for editing instead of accepting.
    HistoryVerify,
    /// Lines starting with a space are not added to history.
    HistoryIgnoreSpace,
    /// A line equal to the previous entry is not added again.
    HistoryIgnoreDups,
    /// Squeeze runs of blanks before adding a line to history.
    HistoryReduceBlanks,
    /// Bell when history navigation runs off either end.
    HistoryBeep,
    /// Incremental searches update on every key.
    HistoryIncremental,
    /// A second completion request on an ambiguous word opens the menu.
    AutoMenu,
    /// An ambiguous completion lists the candidates.
    AutoList,
    /// An exact match is accepted even if longer candidates exist.
    RecognizeExact,
    /// Candidate lists are grouped under their group names.
    Group,
    CaseInsensitive,
    /// List candidates as soon as the word is ambiguous, even if a prefix was inserted.
    ListAmbiguous,
    /// Columns of the candidate list have their own widths.
    ListPacked,
    /// Candidate lists run across rows instead of down columns.
    ListRowsFirst,
    /// The word is treated as a glob pattern when filtering candidates.
    GlobComplete,
    /// The first completion request goes straight into the menu.
    MenuComplete,
    /// Start the prompt on a fresh line if the cursor is not in column 0.
    AutoFreshLine,
    /// Writing into the last column doesn't wrap until the next char.
    DelayLineWrap,
    /// Completing a directory name adds a trailing slash.
    AutoParamSlash,
    /// The slash added by completion is removed if the next char is a separator.
    AutoRemoveSlash,
    /// Completion at the start of a line (or after blanks) inserts a tab.
    InsertTab,
    Mouse,
}

impl LineReaderOption {
    #[must_use]
    pub fn default_value(self) -> bool {
        matches!(
            self,
            LineReaderOption::HistoryIgnoreSpace
                | LineReaderOption::HistoryIgnoreDups
                | LineReaderOption::HistoryReduceBlanks
                | LineReaderOption::HistoryBeep
                | LineReaderOption::HistoryIncremental
                | LineReaderOption::AutoMenu
                | LineReaderOption::AutoList
                | LineReaderOption::AutoParamSlash
                | LineReaderOption::AutoRemoveSlash
                | LineReaderOption::InsertTab
        )
    }
}

/// Explicitly set or unset options. Anything absent has its default value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    overrides: FxHashMap<LineReaderOption, bool>,
}

impl Options {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn is_set(&self, option: LineReaderOption) -> bool {
        self.overrides
            .get(&option)
            .copied()
            .unwrap_or_else(|| option.default_value())
    }

    pub fn set(&mut self, option: LineReaderOption) { self.overrides.insert(option, true); }

    pub fn unset(&mut self, option: LineReaderOption) { self.overrides.insert(option, false); }

    pub fn set_to(&mut self, option: LineReaderOption, value: bool) {
        self.overrides.insert(option, value);
    }

    /// Back to the default value.
    pub fn reset(&mut self, option: LineReaderOption) { self.overrides.remove(&option); }
}
