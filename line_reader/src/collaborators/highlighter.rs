// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, ops::Range};

use crossterm::style::{Attribute, ContentStyle};

/// A run of buffer chars drawn with one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: ContentStyle,
}

impl StyledSpan {
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: ContentStyle::new(),
        }
    }
}

/// What the highlighter gets to see. Ranges are char indices into `buffer`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightRequest<'a> {
    pub buffer: &'a str,
    /// The active region (mark or visual selection).
    pub region: Option<Range<usize>>,
    /// The term of a running history search.
    pub search_term: Option<&'a str>,
}

/// Turns buffer text into styled spans. The spans, concatenated, must reproduce the
/// buffer exactly.
pub trait Highlighter: Debug + Send {
    fn highlight(&self, request: &HighlightRequest<'_>) -> Vec<StyledSpan>;
}

/// Reverse video for the region, underline for the first occurrence of the search
/// term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultHighlighter;

impl Highlighter for DefaultHighlighter {
    fn highlight(&self, request: &HighlightRequest<'_>) -> Vec<StyledSpan> {
        let chars: Vec<char> = request.buffer.chars().collect();
        let mut styles = vec![ContentStyle::new(); chars.len()];

        if let Some(term) = request.search_term
            && !term.is_empty()
            && let Some(byte_start) = request.buffer.find(term)
        {
            let start = request.buffer[..byte_start].chars().count();
            let end = (start + term.chars().count()).min(chars.len());
            for style in &mut styles[start..end] {
                style.attributes.set(Attribute::Underlined);
            }
        }
        if let Some(region) = &request.region {
            let end = region.end.min(chars.len());
            let start = region.start.min(end);
            for style in &mut styles[start..end] {
                style.attributes.set(Attribute::Reverse);
            }
        }

        let mut spans: Vec<StyledSpan> = vec![];
        for (ch, style) in chars.into_iter().zip(styles) {
            match spans.last_mut() {
                Some(last) if last.style == style => last.text.push(ch),
                _ => spans.push(StyledSpan {
                    text: ch.to_string(),
                    style,
                }),
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_buffer_is_one_span() {
        let spans = DefaultHighlighter.highlight(&HighlightRequest {
            buffer: "hello",
            ..Default::default()
        });
        assert_eq!(spans, vec![StyledSpan::plain("hello")]);
    }

    #[test]
    fn test_region_and_search_term() {
        let spans = DefaultHighlighter.highlight(&HighlightRequest {
            buffer: "foo bar baz",
            region: Some(8..11),
            search_term: Some("bar"),
        });
        let texts: Vec<&str> = spans.iter().map(|it| it.text.as_str()).collect();
        assert_eq!(texts, vec!["foo ", "bar", " ", "baz"]);
        assert!(spans[1].style.attributes.has(Attribute::Underlined));
        assert!(spans[3].style.attributes.has(Attribute::Reverse));
        assert_eq!(spans.iter().map(|it| it.text.as_str()).collect::<String>(), "foo bar baz");
    }
}
