// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Column width accounting. Widths are measured in terminal columns over grapheme
//! clusters, with ANSI escape sequences counting as zero.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width of `text` on screen, ignoring any ANSI escape sequences it contains.
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.contains('\x1b') {
        let stripped = strip_ansi_escapes::strip_str(text);
        graphemes_width(&stripped)
    } else {
        graphemes_width(text)
    }
}

fn graphemes_width(text: &str) -> usize {
    text.graphemes(true)
        .map(|grapheme| {
            if grapheme.chars().any(char::is_control) {
                grapheme.chars().map(control_char_width).sum()
            } else {
                UnicodeWidthStr::width(grapheme)
            }
        })
        .sum()
}

fn control_char_width(ch: char) -> usize {
    if ch.is_control() { render_char(ch).len() } else { 1 }
}

/// How a buffer char is drawn: control chars get caret notation (`^A`), everything else
/// is drawn as is. Newlines are left alone; they are handled by the line layout.
#[must_use]
pub fn render_char(ch: char) -> Cow<'static, str> {
    match ch {
        '\n' => Cow::Borrowed("\n"),
        '\t' => Cow::Borrowed("    "),
        '\x7f' => Cow::Borrowed("^?"),
        _ if (ch as u32) < 0x20 => {
            let caret = char::from(b'@' + ch as u8);
            Cow::Owned(format!("^{caret}"))
        }
        _ if ch.is_control() => Cow::Owned(format!("\\u{:04x}", ch as u32)),
        _ => Cow::Owned(ch.to_string()),
    }
}

/// The buffer rendered for display, with control chars made visible.
#[must_use]
pub fn render_chars(chars: &[char]) -> String {
    chars.iter().map(|ch| render_char(*ch)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("abc", 3)]
    #[test_case("\x1b[31mred\x1b[0m", 3)]
    #[test_case("日本", 4)]
    #[test_case("e\u{301}", 1)]
    #[test_case("", 0)]
    fn test_display_width(text: &str, expected: usize) {
        assert_eq!(display_width(text), expected);
    }

    #[test]
    fn test_render_control_chars() {
        assert_eq!(render_char('\x01'), "^A");
        assert_eq!(render_char('\x7f'), "^?");
        assert_eq!(render_chars(&['a', '\x03', 'b']), "a^Cb");
    }
}
