// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use nom::{IResult, Parser,
          branch::alt,
          bytes::complete::{tag, take_till1},
          character::complete::{anychar, char, digit1},
          combinator::{map, not, opt, recognize, value},
          multi::many0,
          sequence::{delimited, preceded}};

use crate::display_width;

/// One piece of a parsed template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptToken {
    Literal(String),
    LineNumber,
    Missing,
    /// Pad up to column `width`, or up to the primary prompt's width when `None`.
    Pad { width: Option<usize>, fill: char },
    ZeroWidth(Vec<PromptToken>),
}

/// Values the escapes expand to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PromptContext<'a> {
    pub line_number: usize,
    pub missing: &'a str,
    /// Width of the rendered primary prompt, the target of `%P`.
    pub primary_width: usize,
}

/// Expanded text, and the column the cursor sits at after printing it (the width of
/// its last line).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub text: String,
    pub width: usize,
}

/// A template, parsed once and rendered on every redisplay.
///
/// ```rust
/// use r3bl_line_reader::{PromptContext, PromptTemplate};
///
/// let rendered = PromptTemplate::parse("ab%3Px>").render(&PromptContext::default());
/// assert_eq!(rendered.text, "abx>");
/// assert_eq!(rendered.width, 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptTemplate {
    tokens: Vec<PromptToken>,
}

impl PromptTemplate {
    #[must_use]
    pub fn parse(template: &str) -> Self {
        // Every input parses: a lone `%` falls through to a literal.
        let tokens = match many0(token).parse(template) {
            Ok((rest, mut tokens)) => {
                if !rest.is_empty() {
                    tokens.push(PromptToken::Literal(rest.to_string()));
                }
                tokens
            }
            Err(_) => vec![PromptToken::Literal(template.to_string())],
        };
        Self { tokens }
    }

    #[must_use]
    pub fn tokens(&self) -> &[PromptToken] { &self.tokens }

    #[must_use]
    pub fn render(&self, context: &PromptContext<'_>) -> RenderedPrompt {
        let mut rendered = RenderedPrompt::default();
        render_tokens(&self.tokens, context, &mut rendered, false);
        rendered
    }
}

/// Parse and render in one go.
#[must_use]
pub fn render_prompt(template: &str, context: &PromptContext<'_>) -> RenderedPrompt {
    PromptTemplate::parse(template).render(context)
}

fn render_tokens(
    tokens: &[PromptToken],
    context: &PromptContext<'_>,
    acc: &mut RenderedPrompt,
    zero_width: bool,
) {
    for token in tokens {
        match token {
            PromptToken::Literal(text) => push_text(acc, text, zero_width),
            PromptToken::LineNumber => {
                push_text(acc, &context.line_number.to_string(), zero_width);
            }
            PromptToken::Missing => push_text(acc, context.missing, zero_width),
            PromptToken::Pad { width, fill } => {
                let target = width.unwrap_or(context.primary_width);
                let fill_width = display_width(&fill.to_string()).max(1);
                let mut column = acc.width;
                while column + fill_width <= target {
                    acc.text.push(*fill);
                    column += fill_width;
                }
                if !zero_width {
                    acc.width = column;
                }
            }
            PromptToken::ZeroWidth(inner) => render_tokens(inner, context, acc, true),
        }
    }
}

fn push_text(acc: &mut RenderedPrompt, text: &str, zero_width: bool) {
    acc.text.push_str(text);
    if zero_width {
        return;
    }
    match text.rsplit_once('\n') {
        Some((_, last_line)) => acc.width = display_width(last_line),
        None => acc.width += display_width(text),
    }
}

fn token(input: &str) -> IResult<&str, PromptToken> {
    alt((
        map(take_till1(|ch: char| ch == '%'), |text: &str| {
            PromptToken::Literal(text.to_string())
        }),
        map(tag("%%"), |_| PromptToken::Literal("%".to_string())),
        value(PromptToken::LineNumber, tag("%N")),
        value(PromptToken::Missing, tag("%M")),
        pad,
        zero_width_span,
        map(recognize((char('%'), opt(anychar))), |text: &str| {
            PromptToken::Literal(text.to_string())
        }),
    ))
    .parse(input)
}

fn pad(input: &str) -> IResult<&str, PromptToken> {
    map(
        (char('%'), opt(digit1), char('P'), opt(anychar)),
        |(_, digits, _, fill): (char, Option<&str>, char, Option<char>)| PromptToken::Pad {
            width: digits.and_then(|it| it.parse().ok()),
            fill: fill.unwrap_or(' '),
        },
    )
    .parse(input)
}

/// `%{ ... %}`. An unclosed span runs to the end of the template.
fn zero_width_span(input: &str) -> IResult<&str, PromptToken> {
    map(
        delimited(tag("%{"), many0(preceded(not(tag("%}")), token)), opt(tag("%}"))),
        PromptToken::ZeroWidth,
    )
    .parse(input)
}
