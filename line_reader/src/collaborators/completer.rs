// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ParsedLine;

/// One completion candidate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Text that replaces the word being completed.
    pub value: String,
    /// Text shown in lists and the menu.
    pub display: String,
    /// Heading the candidate is listed under when the `GROUP` option is set.
    pub group: Option<String>,
    pub description: Option<String>,
    /// Appended after the value (for example `/` after a directory). Removed again
    /// when the next typed char is one of `REMOVE_SUFFIX_CHARS`.
    pub suffix: Option<String>,
    /// A complete candidate gets a trailing space when it is the only match.
    pub complete: bool,
}

impl Candidate {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            display: value.to_string(),
            complete: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_display(mut self, display: &str) -> Self {
        self.display = display.to_string();
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }

    /// Mark as a partial value (a directory, say) that shouldn't get a trailing space.
    #[must_use]
    pub fn incomplete(mut self) -> Self {
        self.complete = false;
        self
    }
}

/// Produces candidates for the word under the cursor. Filtering against the typed
/// word, ordering by group, and the menu are the engine's job; the completer may
/// return everything that fits the position.
pub trait Completer: Send {
    fn complete(&mut self, line: &ParsedLine) -> Vec<Candidate>;
}

impl<F> Completer for F
where
    F: FnMut(&ParsedLine) -> Vec<Candidate> + Send,
{
    fn complete(&mut self, line: &ParsedLine) -> Vec<Candidate> { self(line) }
}

/// Offers the same fixed words everywhere.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringsCompleter {
    candidates: Vec<Candidate>,
}

impl StringsCompleter {
    #[must_use]
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            candidates: words.iter().map(|it| Candidate::new(it.as_ref())).collect(),
        }
    }

    #[must_use]
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self { Self { candidates } }
}

impl Completer for StringsCompleter {
    fn complete(&mut self, _line: &ParsedLine) -> Vec<Candidate> { self.candidates.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_closure_is_a_completer() {
        let mut completer = |line: &ParsedLine| vec![Candidate::new(&format!("{}!", line.word()))];
        let line = ParsedLine::single_word("hi");
        assert_eq!(completer.complete(&line), vec![Candidate::new("hi!")]);
    }

    #[test]
    fn test_candidate_builder() {
        let candidate = Candidate::new("src")
            .with_suffix("/")
            .with_group("dirs")
            .incomplete();
        assert_eq!(candidate.display, "src");
        assert_eq!(candidate.suffix.as_deref(), Some("/"));
        assert!(!candidate.complete);
    }
}
