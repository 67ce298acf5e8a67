// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Completion, listing, and the menu. The completer only produces candidates; filtering
//! against the word, inserting the common prefix, listing in columns, and cycling
//! through the menu happen here.

use std::ops::Range;

use crossterm::style::Stylize;
use rustc_hash::FxHashSet;

use super::editing;
use crate::{Candidate, DEFAULT_ERRORS, DEFAULT_LIST_MAX, EditMode, LineReader,
            LineReaderOption, ParseContext, ParsedLine, Unwind, WidgetName, WidgetResult,
            common_prefix, display_width, glob_matches, reader::MenuState, variable_names};

/// Gap between listing columns.
const COLUMN_GAP: usize = 2;

#[derive(Clone, Copy, Debug, Default)]
struct CompleteRequest {
    /// Complete only the part of the word before the cursor.
    prefix_only: bool,
    /// Cycle through the candidates in the menu.
    menu: bool,
    /// Direction of the first menu step.
    reverse: bool,
    /// List the candidates and change nothing.
    list_only: bool,
}

/// The word being completed and the span of the buffer it replaces.
#[derive(Debug)]
struct Target {
    parsed: ParsedLine,
    pattern: String,
    range: Range<usize>,
}

fn completion_target(reader: &LineReader, prefix_only: bool) -> Option<Target> {
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let parsed = reader
        .parser
        .parse(&buffer.text(), cursor, ParseContext::Complete)
        .ok()?;
    let span = parsed.word_span();
    let (pattern, range) =
        if reader.is_set(LineReaderOption::CompleteInWord) && !prefix_only {
            (parsed.word().to_string(), span)
        } else {
            (parsed.word_before_cursor(), span.start.min(cursor)..cursor)
        };
    Some(Target {
        parsed,
        pattern,
        range,
    })
}

fn starts_with(value: &str, prefix: &str, ignore_case: bool) -> bool {
    if ignore_case {
        value.to_lowercase().starts_with(&prefix.to_lowercase())
    } else {
        value.starts_with(prefix)
    }
}

/// Candidates matching `pattern`, in the completer's order: by prefix, or as a glob
/// with `GLOB_COMPLETE`. When nothing matches, candidates whose start is within
/// `errors` edits of the pattern.
fn matching(reader: &LineReader, mut candidates: Vec<Candidate>, pattern: &str) -> Vec<Candidate> {
    let mut seen = FxHashSet::default();
    candidates.retain(|candidate| seen.insert(candidate.value.clone()));

    let ignore_case = reader.is_set(LineReaderOption::CaseInsensitive);
    let as_glob = reader.is_set(LineReaderOption::GlobComplete)
        && pattern.contains(['*', '?', '[']);
    let glob = format!("{pattern}*");
    let matched: Vec<Candidate> = candidates
        .iter()
        .filter(|candidate| {
            if as_glob {
                glob_matches(&glob, &candidate.value, ignore_case)
            } else {
                starts_with(&candidate.value, pattern, ignore_case)
            }
        })
        .cloned()
        .collect();
    if !matched.is_empty() || pattern.is_empty() || as_glob {
        return matched;
    }

    let errors = usize::try_from(
        reader
            .variables
            .get_int(variable_names::ERRORS, DEFAULT_ERRORS),
    )
    .unwrap_or(0);
    if errors == 0 {
        return matched;
    }
    let pattern_len = pattern.chars().count();
    let fold = |text: &str| {
        if ignore_case {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    };
    let pattern = fold(pattern);
    candidates
        .into_iter()
        .filter(|candidate| {
            let start: String = candidate.value.chars().take(pattern_len).collect();
            strsim::levenshtein(&fold(&start), &pattern) <= errors
        })
        .collect()
}

/// What goes after an accepted candidate: its own suffix, or a space when it's
/// complete.
fn suffix_for(reader: &LineReader, candidate: &Candidate) -> String {
    match candidate.suffix.as_deref() {
        Some("/") if !reader.is_set(LineReaderOption::AutoParamSlash) => String::new(),
        Some(suffix) if !suffix.is_empty() => suffix.to_string(),
        _ if candidate.complete => " ".to_string(),
        _ => String::new(),
    }
}

/// Replace `range` with the candidate and its suffix. The suffix may be taken back by
/// the next typed char.
fn insert_candidate(reader: &mut LineReader, range: Range<usize>, candidate: &Candidate) -> usize {
    let suffix = suffix_for(reader, candidate);
    let text = format!("{}{suffix}", candidate.value);
    reader.state.buffer.replace_range(range, &text);
    let removable = !suffix.is_empty()
        && (suffix != "/" || reader.is_set(LineReaderOption::AutoRemoveSlash));
    reader.state.completion_suffix = removable.then_some(suffix);
    text.chars().count()
}

fn complete(reader: &mut LineReader, request: CompleteRequest) -> WidgetResult {
    if reader
        .variables
        .get_bool(variable_names::DISABLE_COMPLETION, false)
    {
        return Ok(false);
    }
    let buffer = &reader.state.buffer;
    let cursor = buffer.cursor();
    let blank_before = buffer
        .substring(buffer.line_start(cursor)..cursor)
        .chars()
        .all(char::is_whitespace);
    if blank_before && !request.list_only && reader.is_set(LineReaderOption::InsertTab) {
        reader.state.buffer.insert_char('\t');
        return Ok(true);
    }

    let Some(target) = completion_target(reader, request.prefix_only) else {
        return Ok(false);
    };
    let Some(completer) = reader.completer.as_mut() else {
        return Ok(false);
    };
    let produced = completer.complete(&target.parsed);
    let candidates = matching(reader, produced, &target.pattern);
    tracing::debug!(
        message = "completion",
        pattern = %target.pattern,
        candidates = candidates.len(),
        menu = request.menu
    );
    if candidates.is_empty() {
        return Ok(false);
    }
    if request.list_only {
        return list_candidates(reader, &candidates);
    }

    let ignore_case = reader.is_set(LineReaderOption::CaseInsensitive);
    let exact = reader
        .is_set(LineReaderOption::RecognizeExact)
        .then(|| {
            candidates
                .iter()
                .find(|candidate| candidate.value == target.pattern)
        })
        .flatten();
    if let Some(candidate) = exact.or(candidates.first().filter(|_| candidates.len() == 1)) {
        let candidate = candidate.clone();
        insert_candidate(reader, target.range, &candidate);
        return Ok(true);
    }

    let values: Vec<&str> = candidates.iter().map(|it| it.value.as_str()).collect();
    let prefix = common_prefix(&values, ignore_case).unwrap_or_default();
    let inserted = prefix.chars().count() > target.pattern.chars().count();
    if inserted {
        reader.state.buffer.replace_range(target.range.clone(), &prefix);
    }

    let asked_again = reader
        .state
        .last_widget
        .is_some_and(WidgetName::is_completion);
    if request.menu
        || reader.is_set(LineReaderOption::MenuComplete)
        || (reader.is_set(LineReaderOption::AutoMenu) && !inserted && asked_again)
    {
        open_menu(reader, candidates, target.range.start, request.reverse);
        return Ok(true);
    }
    let list = reader.is_set(LineReaderOption::AutoList)
        && (!inserted || reader.is_set(LineReaderOption::ListAmbiguous));
    if list {
        return Ok(list_candidates(reader, &candidates)? || inserted);
    }
    Ok(inserted)
}

fn open_menu(reader: &mut LineReader, candidates: Vec<Candidate>, start: usize, reverse: bool) {
    let inserted = reader.state.buffer.cursor().saturating_sub(start);
    reader.state.menu = Some(MenuState {
        candidates,
        selected: None,
        start,
        inserted,
    });
    reader.state.mode.set_mode(EditMode::Menu);
    menu_step(reader, !reverse);
}

/// Select the next (or previous) candidate, put it in the buffer in place of the last
/// one, and show the listing with it highlighted.
fn menu_step(reader: &mut LineReader, forward: bool) {
    let Some(menu) = reader.state.menu.as_ref() else {
        return;
    };
    let len = menu.candidates.len();
    if len == 0 {
        return;
    }
    let next = match (menu.selected, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(index), true) => (index + 1) % len,
        (Some(index), false) => (index + len - 1) % len,
    };
    let candidate = menu.candidates[next].clone();
    let candidates = menu.candidates.clone();
    let range = menu.start..menu.start + menu.inserted;

    let inserted = insert_candidate(reader, range, &candidate);
    let listing = format_listing(reader, &candidates, Some(next));
    if let Some(menu) = reader.state.menu.as_mut() {
        menu.selected = Some(next);
        menu.inserted = inserted;
    }
    reader.state.post = Some(listing);
}

impl LineReader {
    /// Leave the completion menu. The selected candidate stays in the buffer.
    pub(crate) fn close_menu(&mut self) {
        if self.state.menu.take().is_some() {
            self.state.post = None;
        }
        self.state.mode.exit_menu();
    }
}

/// Show the candidates below the buffer. More than `list-max` asks first.
fn list_candidates(reader: &mut LineReader, candidates: &[Candidate]) -> WidgetResult {
    let list_max = reader
        .variables
        .get_int(variable_names::LIST_MAX, DEFAULT_LIST_MAX);
    let too_many = usize::try_from(list_max).is_ok_and(|max| max > 0 && candidates.len() > max);
    if too_many {
        reader.state.post = Some(format!(
            "Display all {} possibilities? (y or n)",
            candidates.len()
        ));
        reader.redisplay()?;
        let answer = reader.read_key()?.printable_char();
        if !matches!(answer, Some('y' | 'Y')) {
            reader.state.post = None;
            return Ok(true);
        }
    }
    reader.state.post = Some(format_listing(reader, candidates, None));
    Ok(true)
}

/// Lay the candidates out in columns that fit the terminal, under group headings when
/// `GROUP` is set. `selected` is drawn reversed.
fn format_listing(reader: &LineReader, candidates: &[Candidate], selected: Option<usize>) -> String {
    let labels: Vec<String> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let label = match &candidate.description {
                Some(description) => format!("{}  -- {description}", candidate.display),
                None => candidate.display.clone(),
            };
            if selected == Some(index) {
                label.reverse().to_string()
            } else {
                label
            }
        })
        .collect();

    let layout = ColumnLayout {
        width: reader.terminal_width(),
        packed: reader.is_set(LineReaderOption::ListPacked),
        rows_first: reader.is_set(LineReaderOption::ListRowsFirst),
    };

    if !reader.is_set(LineReaderOption::Group) {
        return layout.format(&labels.iter().map(String::as_str).collect::<Vec<_>>());
    }
    let mut groups: Vec<(Option<&str>, Vec<&str>)> = vec![];
    for (candidate, label) in candidates.iter().zip(&labels) {
        let group = candidate.group.as_deref();
        match groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, members)) => members.push(label.as_str()),
            None => groups.push((group, vec![label.as_str()])),
        }
    }
    groups
        .iter()
        .map(|(name, members)| match name {
            Some(name) => format!("{name}\n{}", layout.format(members)),
            None => layout.format(members),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Clone, Copy, Debug)]
struct ColumnLayout {
    width: usize,
    packed: bool,
    rows_first: bool,
}

impl ColumnLayout {
    fn format(&self, labels: &[&str]) -> String {
        if labels.is_empty() {
            return String::new();
        }
        let widths: Vec<usize> = labels.iter().map(|it| display_width(it)).collect();
        let (rows, column_widths) = (1..=labels.len())
            .rev()
            .map(|columns| self.column_widths(&widths, columns))
            .find(|(_, column_widths)| {
                column_widths.iter().sum::<usize>() + COLUMN_GAP * (column_widths.len() - 1)
                    <= self.width
            })
            .unwrap_or_else(|| self.column_widths(&widths, 1));

        let columns = column_widths.len();
        let mut lines = vec![];
        for row in 0..rows {
            let mut line = String::new();
            for (column, column_width) in column_widths.iter().enumerate() {
                let index = self.index(row, column, rows, columns);
                let Some(label) = labels.get(index) else {
                    continue;
                };
                if !line.is_empty() {
                    line.push_str(&" ".repeat(COLUMN_GAP));
                }
                line.push_str(label);
                line.push_str(&" ".repeat(column_width.saturating_sub(widths[index])));
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    fn index(&self, row: usize, column: usize, rows: usize, columns: usize) -> usize {
        if self.rows_first {
            row * columns + column
        } else {
            column * rows + row
        }
    }

    /// Rows needed and each column's width, for `columns` columns.
    fn column_widths(&self, widths: &[usize], columns: usize) -> (usize, Vec<usize>) {
        let rows = widths.len().div_ceil(columns);
        let columns = widths.len().div_ceil(rows);
        let widest = widths.iter().copied().max().unwrap_or(0);
        let column_widths = (0..columns)
            .map(|column| {
                if !self.packed {
                    return widest;
                }
                (0..rows)
                    .filter_map(|row| widths.get(self.index(row, column, rows, columns)))
                    .copied()
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        (rows, column_widths)
    }
}

pub(super) fn complete_word(reader: &mut LineReader) -> WidgetResult {
    complete(reader, CompleteRequest::default())
}

pub(super) fn complete_prefix(reader: &mut LineReader) -> WidgetResult {
    complete(reader, CompleteRequest {
        prefix_only: true,
        ..Default::default()
    })
}

/// Expand history references if there are any, otherwise complete.
pub(super) fn expand_or_complete(reader: &mut LineReader, prefix_only: bool) -> WidgetResult {
    if try_history_expansion(reader) {
        return Ok(true);
    }
    complete(reader, CompleteRequest {
        prefix_only,
        ..Default::default()
    })
}

pub(super) fn menu_complete(reader: &mut LineReader, forward: bool) -> WidgetResult {
    if reader.state.mode.mode() == EditMode::Menu && reader.state.menu.is_some() {
        menu_step(reader, forward);
        return Ok(true);
    }
    complete(reader, CompleteRequest {
        menu: true,
        reverse: !forward,
        ..Default::default()
    })
}

pub(super) fn menu_expand_or_complete(reader: &mut LineReader) -> WidgetResult {
    if reader.state.mode.mode() != EditMode::Menu && try_history_expansion(reader) {
        return Ok(true);
    }
    menu_complete(reader, true)
}

pub(super) fn list_choices(reader: &mut LineReader) -> WidgetResult {
    complete(reader, CompleteRequest {
        list_only: true,
        ..Default::default()
    })
}

/// `^D`: end of input on an empty line, delete under the cursor, list at the end.
pub(super) fn delete_char_or_list(reader: &mut LineReader) -> WidgetResult {
    let buffer = &reader.state.buffer;
    if buffer.is_empty() && reader.state.keys.last().is_some_and(|key| key.is_ctrl_d()) {
        return Err(Unwind::EndOfInput);
    }
    if buffer.cursor() < buffer.len() {
        return editing::delete_char(reader);
    }
    list_choices(reader)
}

/// Like `list-choices`, but show the history expansion of the line if it has one.
pub(super) fn list_expand(reader: &mut LineReader) -> WidgetResult {
    let text = reader.state.buffer.text();
    match reader
        .expander
        .expand_history(reader.history.as_ref(), &text)
    {
        Ok(expanded) if expanded != text => {
            reader.state.post = Some(expanded);
            Ok(true)
        }
        _ => list_choices(reader),
    }
}

/// Replace the word under the cursor with its expansion.
pub(super) fn expand_word(reader: &mut LineReader) -> WidgetResult {
    let Some(target) = completion_target(reader, false) else {
        return Ok(false);
    };
    let span = target.parsed.word_span();
    let word = target.parsed.word();
    let expanded = reader.expander.expand_var(word);
    if expanded == word {
        return Ok(false);
    }
    reader.state.buffer.replace_range(span, &expanded);
    Ok(true)
}

pub(super) fn expand_history(reader: &mut LineReader) -> WidgetResult {
    let text = reader.state.buffer.text();
    match reader
        .expander
        .expand_history(reader.history.as_ref(), &text)
    {
        Ok(expanded) if expanded != text => {
            reader.state.buffer.replace_all(&expanded);
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(error) => {
            reader.state.post = Some(error.to_string());
            Ok(false)
        }
    }
}

/// Replace the word under the cursor with the closest candidate.
pub(super) fn spell_word(reader: &mut LineReader) -> WidgetResult {
    let Some(target) = completion_target(reader, false) else {
        return Ok(false);
    };
    let Some(completer) = reader.completer.as_mut() else {
        return Ok(false);
    };
    let word = target.parsed.word().to_string();
    let closest = completer
        .complete(&target.parsed)
        .into_iter()
        .map(|candidate| (strsim::levenshtein(&candidate.value, &word), candidate))
        .min_by(|(a, x), (b, y)| a.cmp(b).then_with(|| x.value.cmp(&y.value)));
    match closest {
        Some((distance, candidate)) if distance > 0 => {
            let span = target.parsed.word_span();
            reader.state.buffer.replace_range(span, &candidate.value);
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Expand history references in place. `true` if the line changed.
fn try_history_expansion(reader: &mut LineReader) -> bool {
    if reader.is_set(LineReaderOption::DisableEventExpansion) {
        return false;
    }
    let text = reader.state.buffer.text();
    if !text.contains(['!', '^']) {
        return false;
    }
    match reader
        .expander
        .expand_history(reader.history.as_ref(), &text)
    {
        Ok(expanded) if expanded != text => {
            reader.state.buffer.replace_all(&expanded);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{cursor, reader_with, reader_with_keys, run, text, typed};
    use super::*;
    use crate::{KeyPress, MemoryHistory, StringsCompleter, WidgetName, call_builtin};
    use pretty_assertions::assert_eq;

    fn completing(line: &str, words: &[&str]) -> LineReader {
        let mut reader = reader_with(line, line.chars().count());
        reader.completer = Some(Box::new(StringsCompleter::new(words)));
        reader
    }

    #[test]
    fn test_single_match_is_accepted_with_space() {
        let mut reader = completing("git st", &["status", "stash", "commit"]);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "git sta");

        let mut reader = completing("git sta", &["status", "commit"]);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "git status ");
        assert_eq!(reader.state.completion_suffix.as_deref(), Some(" "));
    }

    #[test]
    fn test_no_match_rings_the_bell() {
        let mut reader = completing("git zz", &["status"]);
        reader.variables.set(variable_names::ERRORS, 0_i64);
        assert!(!run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "git zz");
    }

    #[test]
    fn test_typos_are_tolerated() {
        let mut reader = completing("git stsu", &["status", "commit"]);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "git status ");
    }

    #[test]
    fn test_ambiguous_lists_candidates() {
        let mut reader = completing("git s", &["status", "show", "status"]);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "git s");
        assert_eq!(reader.state.post.as_deref(), Some("status  show"));
    }

    #[test]
    fn test_second_request_opens_menu() {
        let mut reader = completing("git s", &["status", "show"]);
        reader.state.last_widget = Some(WidgetName::CompleteWord);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(reader.state.mode.mode(), EditMode::Menu);
        assert_eq!(text(&reader), "git status ");

        assert!(run(&mut reader, WidgetName::MenuComplete));
        assert_eq!(text(&reader), "git show ");
        assert!(run(&mut reader, WidgetName::MenuComplete));
        assert_eq!(text(&reader), "git status ");
        assert!(run(&mut reader, WidgetName::ReverseMenuComplete));
        assert_eq!(text(&reader), "git show ");

        reader.close_menu();
        assert_eq!(reader.state.mode.mode(), EditMode::Emacs);
        assert_eq!(reader.state.post, None);
        assert_eq!(text(&reader), "git show ");
    }

    #[test]
    fn test_reverse_menu_starts_at_last() {
        let mut reader = completing("c", &["cat", "cd", "cp"]);
        assert!(run(&mut reader, WidgetName::ReverseMenuComplete));
        assert_eq!(text(&reader), "cp ");
        assert_eq!(cursor(&reader), 3);
    }

    #[test]
    fn test_tab_on_blank_line_inserts_tab() {
        let mut reader = completing("", &["status"]);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "\t");

        let mut reader = completing("", &["status"]);
        reader.options_mut().unset(LineReaderOption::InsertTab);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "status ");
    }

    #[test]
    fn test_incomplete_and_slash_suffixes() {
        let mut reader = reader_with("cd sr", 5);
        reader.completer = Some(Box::new(StringsCompleter::from_candidates(vec![
            Candidate::new("src").with_suffix("/").incomplete(),
        ])));
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "cd src/");

        let mut reader = reader_with("cd sr", 5);
        reader.options_mut().unset(LineReaderOption::AutoParamSlash);
        reader.completer = Some(Box::new(StringsCompleter::from_candidates(vec![
            Candidate::new("src").with_suffix("/").incomplete(),
        ])));
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "cd src");
    }

    #[test]
    fn test_recognize_exact_and_case_insensitive() {
        let mut reader = completing("ls", &["ls", "lsof"]);
        reader.options_mut().set(LineReaderOption::RecognizeExact);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "ls ");

        let mut reader = completing("MA", &["make"]);
        reader.options_mut().set(LineReaderOption::CaseInsensitive);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "make ");
    }

    #[test]
    fn test_glob_complete() {
        let mut reader = completing("*.rs", &["main.rs", "lib.rs", "Cargo.toml"]);
        reader.options_mut().set(LineReaderOption::GlobComplete);
        reader.options_mut().unset(LineReaderOption::AutoList);
        assert!(!run(&mut reader, WidgetName::CompleteWord));
        reader.state.last_widget = Some(WidgetName::CompleteWord);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "main.rs ");
    }

    #[test]
    fn test_complete_in_word_replaces_whole_word() {
        let mut reader = completing("git stus", &["status"]);
        reader.state.buffer.set_cursor(6);
        reader.options_mut().set(LineReaderOption::CompleteInWord);
        reader.variables.set(variable_names::ERRORS, 3_i64);
        assert!(run(&mut reader, WidgetName::CompleteWord));
        assert_eq!(text(&reader), "git status ");
    }

    #[test]
    fn test_disable_completion() {
        let mut reader = completing("git s", &["status"]);
        reader.variables.set(variable_names::DISABLE_COMPLETION, true);
        assert!(!run(&mut reader, WidgetName::CompleteWord));
    }

    #[test]
    fn test_listing_asks_past_list_max() {
        let mut reader = reader_with_keys("x", 1, "n");
        reader.completer = Some(Box::new(StringsCompleter::new(&["xa", "xb", "xc"])));
        reader.variables.set(variable_names::LIST_MAX, 2_i64);
        assert!(run(&mut reader, WidgetName::ListChoices));
        assert_eq!(reader.state.post, None);
        assert_eq!(text(&reader), "x");
    }

    #[test]
    fn test_grouped_listing_with_descriptions() {
        let mut reader = reader_with("", 0);
        reader.options_mut().set(LineReaderOption::Group);
        let candidates = vec![
            Candidate::new("add").with_group("commands").with_description("stage"),
            Candidate::new("-v").with_group("flags"),
            Candidate::new("rm").with_group("commands"),
        ];
        let listing = format_listing(&reader, &candidates, None);
        assert_eq!(listing, "commands\nadd  -- stage  rm\nflags\n-v");
    }

    #[test]
    fn test_listing_wraps_to_width() {
        let layout = ColumnLayout {
            width: 10,
            packed: false,
            rows_first: false,
        };
        assert_eq!(layout.format(&["aaa", "bb", "c", "dd"]), "aaa  c\nbb   dd");

        let rows_first = ColumnLayout {
            rows_first: true,
            ..layout
        };
        assert_eq!(rows_first.format(&["aaa", "bb", "c", "dd"]), "aaa  bb\nc    dd");

        let packed = ColumnLayout {
            packed: true,
            ..layout
        };
        assert_eq!(packed.format(&["aaa", "b", "c", "d"]), "aaa  c\nb    d");
    }

    #[test]
    fn test_delete_char_or_list() {
        let mut reader = reader_with("", 0);
        typed(&mut reader, KeyPress::ctrl('d'));
        let result = call_builtin(&mut reader, WidgetName::DeleteCharOrList);
        assert!(matches!(result, Err(Unwind::EndOfInput)));

        let mut reader = reader_with("ab", 0);
        typed(&mut reader, KeyPress::ctrl('d'));
        assert!(run(&mut reader, WidgetName::DeleteCharOrList));
        assert_eq!(text(&reader), "b");
    }

    #[test]
    fn test_expand_or_complete_expands_history_first() {
        let mut reader = completing("echo !!", &["status"]);
        reader.history = Box::new(MemoryHistory::from_lines(&["ls -l"]));
        assert!(run(&mut reader, WidgetName::ExpandOrComplete));
        assert_eq!(text(&reader), "echo ls -l");
    }

    #[test]
    fn test_expand_history_reports_missing_event() {
        let mut reader = reader_with("!nope", 5);
        assert!(!run(&mut reader, WidgetName::ExpandHistory));
        assert_eq!(reader.state.post.as_deref(), Some("!nope: event not found"));
    }

    #[test]
    fn test_spell_word_picks_closest() {
        let mut reader = completing("git comit", &["commit", "config"]);
        assert!(run(&mut reader, WidgetName::SpellWord));
        assert_eq!(text(&reader), "git commit");
    }
}
