// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Incremental history search (`^R` / `^S`). The search runs its own key loop: typed
//! chars grow the term, `^R` / `^S` jump to the next match, and any key the search
//! doesn't use ends it and is then run as usual.

use super::{editing, history_nav};
use crate::{DEFAULT_SEARCH_TERMINATORS, KeyPress, LineReader, LineReaderOption, SearchDirection,
            SearchKind, Unwind, WidgetResult, entry_matches, is_backspace, variable_names};

#[derive(Debug)]
struct ISearch {
    term: String,
    direction: SearchDirection,
    kind: SearchKind,
    /// History index of the entry shown, `None` before the first match.
    found: Option<usize>,
    failing: bool,
}

impl ISearch {
    fn prompt(&self) -> String {
        let failing = if self.failing { "failing " } else { "" };
        let direction = match self.direction {
            SearchDirection::Backward => "bck",
            SearchDirection::Forward => "fwd",
        };
        let pattern = match self.kind {
            SearchKind::Glob => " (pattern)",
            _ => "",
        };
        format!("{failing}{direction}-i-search{pattern}: {}_", self.term)
    }
}

/// The nearest matching entry from `from`, which is itself checked when `inclusive`.
fn find_entry(
    reader: &LineReader,
    search: &ISearch,
    from: usize,
    inclusive: bool,
) -> Option<usize> {
    let len = reader.history.len();
    let ignore_case = history_nav::cases_ignored(reader);
    let matches = |index: &usize| {
        reader
            .history
            .get(*index)
            .is_some_and(|entry| entry_matches(entry, &search.term, search.kind, ignore_case))
    };
    match search.direction {
        SearchDirection::Backward => {
            let end = if inclusive { from.saturating_add(1) } else { from };
            (0..end.min(len)).rev().find(matches)
        }
        SearchDirection::Forward => {
            let start = if inclusive { from } else { from.saturating_add(1) };
            (start..len).find(matches)
        }
    }
}

/// Char index of the first match of `term` in `entry`. Pattern matches start the
/// cursor at the beginning of the entry.
fn match_position(entry: &str, search: &ISearch, ignore_case: bool) -> usize {
    let byte_index = match search.kind {
        SearchKind::Glob => None,
        _ if ignore_case => entry.to_lowercase().find(&search.term.to_lowercase()),
        _ => entry.find(&search.term),
    };
    byte_index
        .and_then(|byte_index| entry.get(..byte_index))
        .map_or(0, |before| before.chars().count())
}

/// Look for the term from `from`, show the match, or mark the search failing and ring
/// the bell.
fn search_from(
    reader: &mut LineReader,
    search: &mut ISearch,
    from: usize,
    inclusive: bool,
) -> Result<(), Unwind> {
    match find_entry(reader, search, from, inclusive) {
        Some(index) => {
            search.found = Some(index);
            search.failing = false;
            history_nav::show_entry(reader, index, false);
            let entry = reader.history.get(index).unwrap_or_default().to_string();
            if reader.state.buffer.text() != entry {
                reader.state.buffer.replace_all(&entry);
            }
            let position = match_position(&entry, search, history_nav::cases_ignored(reader));
            reader.state.buffer.set_cursor(position);
        }
        None => {
            search.failing = true;
            reader.beep()?;
        }
    }
    Ok(())
}

pub(super) fn incremental_search(
    reader: &mut LineReader,
    direction: SearchDirection,
    kind: SearchKind,
) -> WidgetResult {
    let original = reader.state.buffer.snapshot();
    let original_index = reader.history.index();
    let had_saved_line = reader.state.history_saved_line.is_some();
    let terminators = reader
        .variables
        .get_string(variable_names::SEARCH_TERMINATORS, DEFAULT_SEARCH_TERMINATORS);
    let incremental = reader.is_set(LineReaderOption::HistoryIncremental);
    let mut search = ISearch {
        term: String::new(),
        direction,
        kind,
        found: None,
        failing: false,
    };
    tracing::debug!(message = "incremental search", ?direction, ?kind);

    let outcome = loop {
        reader.state.search_term = Some(search.term.clone());
        reader.state.minibuffer = Some(search.prompt());
        reader.redisplay()?;
        let key = match reader.read_key() {
            Ok(key) => key,
            Err(unwind) => break Err(unwind),
        };

        if key == KeyPress::ctrl('g') {
            reader.state.buffer.restore(&original);
            reader.history.move_to(original_index);
            if !had_saved_line {
                reader.state.history_saved_line = None;
            }
            break Ok(true);
        }
        if key == KeyPress::ctrl('c') {
            break Err(Unwind::Interrupted);
        }
        if key == KeyPress::ctrl('r') || key == KeyPress::ctrl('s') {
            search.direction = if key == KeyPress::ctrl('r') {
                SearchDirection::Backward
            } else {
                SearchDirection::Forward
            };
            if !search.term.is_empty() {
                let from = search.found.unwrap_or(original_index);
                let fresh = search.found.is_none();
                search_from(reader, &mut search, from, fresh)?;
            }
            continue;
        }
        if is_backspace(key) {
            search.term.pop();
            search.found = None;
            search.failing = false;
            if search.term.is_empty() {
                reader.state.buffer.restore(&original);
                reader.history.move_to(original_index);
            } else if incremental {
                search_from(reader, &mut search, original_index, true)?;
            }
            continue;
        }
        if editing::raw_char(key).is_some_and(|ch| terminators.contains(ch)) {
            break Ok(true);
        }
        match key.printable_char() {
            Some(ch) => {
                search.term.push(ch);
                if incremental {
                    let from = search.found.unwrap_or(original_index);
                    search_from(reader, &mut search, from, true)?;
                }
            }
            None => {
                reader.input.push_front_keys(&[key]);
                break Ok(true);
            }
        }
    };

    if outcome.is_ok() && !incremental && search.found.is_none() && !search.term.is_empty() {
        search_from(reader, &mut search, original_index, true)?;
    }
    reader.state.search_term = None;
    reader.state.minibuffer = None;
    outcome
}
