// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter, Result as FmtResult},
          time::Duration};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Names of the variables the engine reads.
pub mod variable_names {
    pub const BIND_TTY_SPECIAL_CHARS: &str = "bind-tty-special-chars";
    /// Prefix inserted by `insert-comment` / `vi-insert-comment`. Default `#`.
    pub const COMMENT_BEGIN: &str = "comment-begin";
    /// `none` / `off`, `audible` (default), or `visible`.
    pub const BELL_STYLE: &str = "bell-style";
    pub const PREFER_VISIBLE_BELL: &str = "prefer-visible-bell";
    /// Ask before listing more candidates than this. Default 100.
    pub const LIST_MAX: &str = "list-max";
    pub const DISABLE_HISTORY: &str = "disable-history";
    pub const DISABLE_COMPLETION: &str = "disable-completion";
    /// `emacs` (default) or `vi`.
    pub const EDITING_MODE: &str = "editing-mode";
    pub const KEYMAP: &str = "keymap";
    pub const BLINK_MATCHING_PAREN: &str = "blink-matching-paren";
    /// Chars that count as part of a word besides alphanumerics.
    pub const WORDCHARS: &str = "WORDCHARS";
    pub const REMOVE_SUFFIX_CHARS: &str = "REMOVE_SUFFIX_CHARS";
    /// Chars that end an incremental search. Default `ESC` and `^J`.
    pub const SEARCH_TERMINATORS: &str = "search-terminators";
    /// Typos tolerated when no candidate matches the word exactly. Default 2.
    pub const ERRORS: &str = "errors";
    pub const SECONDARY_PROMPT_PATTERN: &str = "secondary-prompt-pattern";
    pub const LINE_OFFSET: &str = "line-offset";
    /// Milliseconds to wait for a longer binding. Default 1000.
    pub const AMBIGUOUS_BINDING: &str = "ambiguous-binding";
    /// `|` separated globs of lines kept out of history.
    pub const HISTORY_IGNORE: &str = "history-ignore";
    pub const HISTORY_FILE: &str = "history-file";
    pub const HISTORY_SIZE: &str = "history-size";
    pub const HISTORY_FILE_SIZE: &str = "history-file-size";
}

pub const DEFAULT_COMMENT_BEGIN: &str = "#";
pub const DEFAULT_LIST_MAX: i64 = 100;
pub const DEFAULT_ERRORS: i64 = 2;
pub const DEFAULT_SECONDARY_PROMPT_PATTERN: &str = "%M> ";
pub const DEFAULT_AMBIGUOUS_BINDING_MS: i64 = 1000;
pub const DEFAULT_HISTORY_SIZE: i64 = 500;
pub const DEFAULT_REMOVE_SUFFIX_CHARS: &str = " \t\n;&|";
pub const DEFAULT_SEARCH_TERMINATORS: &str = "\x1b\n";

/// A variable's value. Getters convert between the variants leniently.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl VariableValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VariableValue::Bool(it) => Some(*it),
            VariableValue::Int(it) => Some(*it != 0),
            VariableValue::Str(it) => match it.trim().to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" | "1" | "" => Some(true),
                "off" | "false" | "no" | "0" => Some(false),
                _ => None,
            },
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            VariableValue::Bool(it) => Some(i64::from(*it)),
            VariableValue::Int(it) => Some(*it),
            VariableValue::Str(it) => it.trim().parse().ok(),
        }
    }
}

impl Display for VariableValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            VariableValue::Bool(it) => write!(f, "{it}"),
            VariableValue::Int(it) => write!(f, "{it}"),
            VariableValue::Str(it) => write!(f, "{it}"),
        }
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self { VariableValue::Bool(value) }
}

impl From<i64> for VariableValue {
    fn from(value: i64) -> Self { VariableValue::Int(value) }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self { VariableValue::Str(value.to_string()) }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self { VariableValue::Str(value) }
}

/// Open ended, string keyed settings. Nothing is validated when a value is set; each
/// getter parses at the point of use and falls back to the default it is given.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    values: FxHashMap<String, VariableValue>,
}

impl Variables {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VariableValue> { self.values.get(name) }

    pub fn set(&mut self, name: &str, value: impl Into<VariableValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<VariableValue> { self.values.remove(name) }

    /// The value rendered as a string, or `default`.
    #[must_use]
    pub fn get_string(&self, name: &str, default: &str) -> String {
        self.get(name)
            .map_or_else(|| default.to_string(), ToString::to_string)
    }

    #[must_use]
    pub fn get_int(&self, name: &str, default: i64) -> i64 {
        self.get(name).and_then(VariableValue::as_int).unwrap_or(default)
    }

    #[must_use]
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(VariableValue::as_bool).unwrap_or(default)
    }

    /// A millisecond count as a [`Duration`]; negative values count as zero.
    #[must_use]
    pub fn get_millis(&self, name: &str, default_ms: i64) -> Duration {
        let millis = self.get_int(name, default_ms);
        Duration::from_millis(u64::try_from(millis).unwrap_or(0))
    }

    /// Names and values, sorted by name.
    #[must_use]
    pub fn iter_sorted(&self) -> Vec<(&str, &VariableValue)> {
        let mut all: Vec<(&str, &VariableValue)> = self
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        all.sort_unstable_by_key(|(name, _)| *name);
        all
    }
}
