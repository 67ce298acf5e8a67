// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, ops::Range};

use miette::Diagnostic;
use thiserror::Error;

/// Why the line is being parsed. Only [`ParseContext::AcceptLine`] may report
/// incomplete input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseContext {
    AcceptLine,
    Complete,
    /// Word motions and other structural queries.
    SplitLine,
}

#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ParseError {
    /// More input is needed. `missing` names what is expected (`quote`, `dquote`,
    /// `newline`) and is shown by the `%M` prompt escape.
    #[error("incomplete input: missing {missing}")]
    #[diagnostic(code(line_reader::parser::incomplete))]
    Incomplete { missing: String },
}

/// A structural view of the buffer: its words and which one holds the cursor.
/// Positions are char indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub line: String,
    pub cursor: usize,
    /// Words with quotes and escapes removed.
    pub words: Vec<String>,
    /// Where each word sits in `line`, quotes included.
    pub word_spans: Vec<Range<usize>>,
    pub word_index: usize,
    /// Cursor offset inside the current (unquoted) word.
    pub word_cursor: usize,
}

impl ParsedLine {
    /// A line holding only `word`, with the cursor at its end.
    #[must_use]
    pub fn single_word(word: &str) -> Self {
        let len = word.chars().count();
        Self {
            line: word.to_string(),
            cursor: len,
            words: vec![word.to_string()],
            word_spans: vec![0..len],
            word_index: 0,
            word_cursor: len,
        }
    }

    /// The word holding the cursor.
    #[must_use]
    pub fn word(&self) -> &str {
        self.words
            .get(self.word_index)
            .map_or("", String::as_str)
    }

    /// Span of the word holding the cursor, or an empty span at the cursor.
    #[must_use]
    pub fn word_span(&self) -> Range<usize> {
        self.word_spans
            .get(self.word_index)
            .cloned()
            .unwrap_or(self.cursor..self.cursor)
    }

    /// The part of the current word before the cursor.
    #[must_use]
    pub fn word_before_cursor(&self) -> String {
        self.word().chars().take(self.word_cursor).collect()
    }
}

/// Splits a line into words.
pub trait Parser: Debug + Send {
    /// # Errors
    ///
    /// Returns [`ParseError::Incomplete`] when `context` is
    /// [`ParseContext::AcceptLine`] and the line needs a continuation.
    fn parse(&self, line: &str, cursor: usize, context: ParseContext) -> Result<ParsedLine, ParseError>;
}

/// Whitespace separated words with `'` / `"` quoting and `\` escapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultParser {
    /// An unclosed quote on accept asks for another line.
    pub eof_on_unclosed_quote: bool,
    /// A trailing `\` on accept asks for another line.
    pub eof_on_escaped_newline: bool,
}

impl Default for DefaultParser {
    fn default() -> Self {
        Self {
            eof_on_unclosed_quote: true,
            eof_on_escaped_newline: true,
        }
    }
}

#[derive(Debug, Default)]
struct WordBuilder {
    words: Vec<String>,
    word_spans: Vec<Range<usize>>,
    current: Option<(String, usize)>,
    word_index: Option<usize>,
    word_cursor: usize,
}

impl WordBuilder {
    fn push_char(&mut self, ch: char, pos: usize) {
        match &mut self.current {
            Some((word, _)) => word.push(ch),
            None => self.current = Some((ch.to_string(), pos)),
        }
    }

    /// Open a word without content yet (an opening quote).
    fn open(&mut self, pos: usize) {
        if self.current.is_none() {
            self.current = Some((String::new(), pos));
        }
    }

    /// `false` if no word is open at the cursor yet.
    fn note_cursor(&mut self) -> bool {
        match &self.current {
            Some((word, _)) => {
                self.word_index = Some(self.words.len());
                self.word_cursor = word.chars().count();
                true
            }
            None => false,
        }
    }

    fn close(&mut self, end: usize) {
        if let Some((word, start)) = self.current.take() {
            self.words.push(word);
            self.word_spans.push(start..end);
        }
    }
}

impl Parser for DefaultParser {
    fn parse(&self, line: &str, cursor: usize, context: ParseContext) -> Result<ParsedLine, ParseError> {
        let chars: Vec<char> = line.chars().collect();
        let mut builder = WordBuilder::default();
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for (pos, ch) in chars.iter().copied().enumerate() {
            // The cursor on the first char of a word belongs to that word once it opens.
            let cursor_waiting = pos == cursor && !builder.note_cursor();
            if escaped {
                escaped = false;
                if ch != '\n' {
                    builder.push_char(ch, pos);
                }
                continue;
            }
            match (quote, ch) {
                (_, '\\') if quote != Some('\'') => {
                    builder.open(pos);
                    escaped = true;
                }
                (Some(open), _) if ch == open => quote = None,
                (Some(_), _) => builder.push_char(ch, pos),
                (None, '\'' | '"') => {
                    builder.open(pos);
                    quote = Some(ch);
                }
                (None, _) if ch.is_whitespace() => builder.close(pos),
                (None, _) => builder.push_char(ch, pos),
            }
            if cursor_waiting && builder.current.is_some() {
                builder.word_index = Some(builder.words.len());
                builder.word_cursor = 0;
            }
        }
        if cursor >= chars.len() {
            let _unused: bool = builder.note_cursor();
        }
        builder.close(chars.len());

        if context == ParseContext::AcceptLine {
            if let Some(open) = quote
                && self.eof_on_unclosed_quote
            {
                let missing = if open == '"' { "dquote" } else { "quote" };
                return Err(ParseError::Incomplete {
                    missing: missing.to_string(),
                });
            }
            if escaped && self.eof_on_escaped_newline {
                return Err(ParseError::Incomplete {
                    missing: "newline".to_string(),
                });
            }
        }

        let cursor = cursor.min(chars.len());
        let WordBuilder {
            mut words,
            mut word_spans,
            word_index,
            word_cursor,
            ..
        } = builder;
        // Cursor between words: an empty word is being completed there.
        let (word_index, word_cursor) = match word_index {
            Some(index) => (index, word_cursor),
            None => {
                let index = word_spans
                    .iter()
                    .position(|span| span.start >= cursor)
                    .unwrap_or(words.len());
                words.insert(index, String::new());
                word_spans.insert(index, cursor..cursor);
                (index, 0)
            }
        };

        Ok(ParsedLine {
            line: line.to_string(),
            cursor,
            words,
            word_spans,
            word_index,
            word_cursor,
        })
    }
}
