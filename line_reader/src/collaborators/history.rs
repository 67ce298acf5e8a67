// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque, fmt::Debug};

use crate::{DEFAULT_HISTORY_SIZE, glob_contains, glob_matches};

/// Which way a history search or navigation goes. Backward is toward older entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchDirection {
    #[default]
    Backward,
    Forward,
}

impl SearchDirection {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            SearchDirection::Backward => SearchDirection::Forward,
            SearchDirection::Forward => SearchDirection::Backward,
        }
    }
}

/// How a search pattern is matched against an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKind {
    Prefix,
    Substring,
    /// A glob that may match anywhere in the entry.
    Glob,
}

/// What to keep out of history, built from the options and variables when a line is
/// accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryPolicy {
    pub ignore_space: bool,
    pub ignore_dups: bool,
    pub reduce_blanks: bool,
    /// Globs; a line matching any of them is not added.
    pub ignore_patterns: Vec<String>,
}

impl HistoryPolicy {
    /// The line as it should be stored, or `None` to skip it. `previous` is the newest
    /// entry.
    #[must_use]
    pub fn filter(&self, line: &str, previous: Option<&str>) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }
        if self.ignore_space && line.starts_with(' ') {
            return None;
        }
        let line = if self.reduce_blanks {
            reduce_blanks(line)
        } else {
            line.to_string()
        };
        if self.ignore_dups && previous == Some(line.as_str()) {
            return None;
        }
        if self
            .ignore_patterns
            .iter()
            .any(|pattern| glob_matches(pattern, &line, false))
        {
            return None;
        }
        Some(line)
    }
}

/// Trim the line and squeeze runs of blanks into one space. Newlines are kept.
fn reduce_blanks(line: &str) -> String {
    let mut acc = String::with_capacity(line.len());
    let mut in_blank = false;
    for ch in line.trim().chars() {
        if ch == ' ' || ch == '\t' {
            if !in_blank {
                acc.push(' ');
            }
            in_blank = true;
        } else {
            acc.push(ch);
            in_blank = false;
        }
    }
    acc
}

/// Does `entry` match `pattern` the way `kind` says.
#[must_use]
pub fn entry_matches(entry: &str, pattern: &str, kind: SearchKind, case_insensitive: bool) -> bool {
    match kind {
        SearchKind::Glob => glob_contains(pattern, entry, case_insensitive),
        _ if case_insensitive => {
            let entry = entry.to_lowercase();
            let pattern = pattern.to_lowercase();
            match kind {
                SearchKind::Prefix => entry.starts_with(&pattern),
                _ => entry.contains(&pattern),
            }
        }
        SearchKind::Prefix => entry.starts_with(pattern),
        SearchKind::Substring => entry.contains(pattern),
    }
}

/// Past lines, oldest first, plus a navigation cursor. The cursor ranges over
/// `0..=len()`, where `len()` stands for the line being edited.
pub trait History: Debug + Send {
    /// Add a line, subject to `policy`. Returns `false` if it was skipped. Moves the
    /// cursor past the end.
    fn add(&mut self, line: &str, policy: &HistoryPolicy) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }

    fn get(&self, index: usize) -> Option<&str>;

    /// The navigation cursor.
    fn index(&self) -> usize;

    /// Move the cursor. Returns `false` (and stays put) if `index > len()`.
    fn move_to(&mut self, index: usize) -> bool;

    fn move_to_end(&mut self) {
        let len = self.len();
        self.move_to(len);
    }

    /// Step toward older entries. Returns the new current entry.
    fn previous(&mut self) -> Option<String> {
        let index = self.index().checked_sub(1)?;
        self.move_to(index);
        self.get(index).map(ToString::to_string)
    }

    /// Step toward newer entries. Returns the new current entry, or an empty string
    /// when stepping past the newest one.
    fn next(&mut self) -> Option<String> {
        let index = self.index() + 1;
        if index > self.len() {
            return None;
        }
        self.move_to(index);
        Some(self.get(index).map(ToString::to_string).unwrap_or_default())
    }

    /// The first entry after `from` (exclusive) in `direction` that matches.
    fn search(
        &self,
        pattern: &str,
        from: usize,
        direction: SearchDirection,
        kind: SearchKind,
        case_insensitive: bool,
    ) -> Option<usize> {
        let matches = |index: &usize| {
            self.get(*index)
                .is_some_and(|entry| entry_matches(entry, pattern, kind, case_insensitive))
        };
        match direction {
            SearchDirection::Backward => (0..from.min(self.len())).rev().find(matches),
            SearchDirection::Forward => (from.saturating_add(1)..self.len()).find(matches),
        }
    }

    /// Bound the number of entries kept. Oldest entries go first.
    fn set_max_size(&mut self, max_size: usize);
}

/// In memory history. Nothing is persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: VecDeque<String>,
    index: usize,
    max_size: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            index: 0,
            max_size: usize::try_from(DEFAULT_HISTORY_SIZE).unwrap_or(usize::MAX),
        }
    }
}

impl MemoryHistory {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// History preloaded with `lines`, oldest first, added without any filtering.
    #[must_use]
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut history = Self::new();
        for line in lines {
            history.push(line.as_ref().to_string());
        }
        history
    }

    fn push(&mut self, line: String) {
        self.entries.push_back(line);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.index = self.entries.len();
    }
}

impl History for MemoryHistory {
    fn add(&mut self, line: &str, policy: &HistoryPolicy) -> bool {
        let previous = self.entries.back().map(String::as_str);
        let Some(line) = policy.filter(line, previous) else {
            self.index = self.entries.len();
            tracing::debug!(message = "history skipped line");
            return false;
        };
        self.push(line);
        true
    }

    fn len(&self) -> usize { self.entries.len() }

    fn get(&self, index: usize) -> Option<&str> { self.entries.get(index).map(String::as_str) }

    fn index(&self) -> usize { self.index }

    fn move_to(&mut self, index: usize) -> bool {
        if index > self.entries.len() {
            return false;
        }
        self.index = index;
        true
    }

    fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.index = self.index.min(self.entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn policy() -> HistoryPolicy {
        HistoryPolicy {
            ignore_space: true,
            ignore_dups: true,
            reduce_blanks: true,
            ignore_patterns: vec!["ls*".to_string()],
        }
    }

    #[test_case("echo   a  b ", Some("echo a b"))]
    #[test_case(" secret", None)]
    #[test_case("ls -la", None)]
    #[test_case("   ", None)]
    fn test_policy(line: &str, expected: Option<&str>) {
        assert_eq!(policy().filter(line, None).as_deref(), expected);
    }

    #[test]
    fn test_dups_are_skipped() {
        let mut history = MemoryHistory::new();
        assert!(history.add("make", &policy()));
        assert!(!history.add("make", &policy()));
        assert!(history.add("make test", &policy()));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_navigation() {
        let mut history = MemoryHistory::from_lines(&["one", "two"]);
        assert_eq!(history.index(), 2);
        assert_eq!(history.previous().as_deref(), Some("two"));
        assert_eq!(history.previous().as_deref(), Some("one"));
        assert_eq!(history.previous(), None);
        assert_eq!(history.next().as_deref(), Some("two"));
        assert_eq!(history.next().as_deref(), Some(""));
        assert_eq!(history.next(), None);
    }

    #[test]
    fn test_search() {
        let history = MemoryHistory::from_lines(&["git status", "cargo build", "git push", "Cargo test"]);
        let len = history.len();
        assert_eq!(
            history.search("git", len, SearchDirection::Backward, SearchKind::Prefix, false),
            Some(2)
        );
        assert_eq!(
            history.search("git", 2, SearchDirection::Backward, SearchKind::Prefix, false),
            Some(0)
        );
        assert_eq!(
            history.search("cargo", 0, SearchDirection::Forward, SearchKind::Prefix, true),
            Some(1)
        );
        assert_eq!(
            history.search("cargo", 1, SearchDirection::Forward, SearchKind::Prefix, true),
            Some(3)
        );
        assert_eq!(
            history.search("b*d", len, SearchDirection::Backward, SearchKind::Glob, false),
            Some(1)
        );
        assert_eq!(
            history.search("push", len, SearchDirection::Backward, SearchKind::Substring, false),
            Some(2)
        );
    }

    #[test]
    fn test_max_size() {
        let mut history = MemoryHistory::new();
        history.set_max_size(2);
        for line in ["a", "b", "c"] {
            history.add(line, &HistoryPolicy::default());
        }
        assert_eq!(history.get(0), Some("b"));
        assert_eq!(history.len(), 2);
    }
}
