// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Word boundary scanning over a `&[char]` buffer. Emacs style motions take a word
//! predicate (alphanumerics plus `WORDCHARS`, or alphanumerics only). Vi style motions
//! use three char classes for `w`/`b`/`e` and two for the blank delimited `W`/`B`/`E`.
//!
//! Every function takes a position and returns the new one, clamped to
//! `0..=chars.len()`.

/// The `WORDCHARS` default: non alphanumeric chars that emacs word motions treat as
/// part of a word.
pub const DEFAULT_WORDCHARS: &str = "*?_-.[]~=/&;!#$%^(){}<>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViCharClass {
    Blank,
    Word,
    Punctuation,
}

#[must_use]
pub fn vi_char_class(ch: char) -> ViCharClass {
    if ch.is_whitespace() {
        ViCharClass::Blank
    } else if ch.is_alphanumeric() || ch == '_' {
        ViCharClass::Word
    } else {
        ViCharClass::Punctuation
    }
}

/// Emacs word char: alphanumeric or one of `wordchars`.
#[must_use]
pub fn is_word_char(ch: char, wordchars: &str) -> bool {
    ch.is_alphanumeric() || wordchars.contains(ch)
}

/// Skip non word chars, then word chars.
#[must_use]
pub fn forward_word_end(chars: &[char], pos: usize, is_word: impl Fn(char) -> bool) -> usize {
    let mut pos = pos.min(chars.len());
    while pos < chars.len() && !is_word(chars[pos]) {
        pos += 1;
    }
    while pos < chars.len() && is_word(chars[pos]) {
        pos += 1;
    }
    pos
}

/// Skip non word chars backwards, then word chars backwards.
#[must_use]
pub fn backward_word_start(chars: &[char], pos: usize, is_word: impl Fn(char) -> bool) -> usize {
    let mut pos = pos.min(chars.len());
    while pos > 0 && !is_word(chars[pos - 1]) {
        pos -= 1;
    }
    while pos > 0 && is_word(chars[pos - 1]) {
        pos -= 1;
    }
    pos
}

/// Start of the word the cursor is in (or the one before it), and the end of the next
/// word: the span a `transpose-words` or `capitalize-word` works on.
#[must_use]
pub fn word_at(chars: &[char], pos: usize, is_word: impl Fn(char) -> bool + Copy) -> (usize, usize) {
    let end = forward_word_end(chars, pos, is_word);
    let start = backward_word_start(chars, end, is_word);
    (start, end)
}

fn blank_class(ch: char) -> ViCharClass {
    if ch.is_whitespace() {
        ViCharClass::Blank
    } else {
        ViCharClass::Word
    }
}

fn class_fn(big_word: bool) -> fn(char) -> ViCharClass {
    if big_word { blank_class } else { vi_char_class }
}

/// Vi `w` (or `W` when `big_word`): start of the next word. Stops at the end of the
/// buffer.
#[must_use]
pub fn vi_forward_word(chars: &[char], pos: usize, big_word: bool) -> usize {
    let class = class_fn(big_word);
    let len = chars.len();
    let mut pos = pos.min(len);
    if pos < len {
        let start_class = class(chars[pos]);
        if start_class != ViCharClass::Blank {
            while pos < len && class(chars[pos]) == start_class {
                pos += 1;
            }
        }
    }
    while pos < len && class(chars[pos]) == ViCharClass::Blank {
        pos += 1;
    }
    pos
}

/// Vi `b` (or `B`): start of the current or previous word.
#[must_use]
pub fn vi_backward_word(chars: &[char], pos: usize, big_word: bool) -> usize {
    let class = class_fn(big_word);
    let mut pos = pos.min(chars.len());
    while pos > 0 && class(chars[pos - 1]) == ViCharClass::Blank {
        pos -= 1;
    }
    if pos > 0 {
        let word_class = class(chars[pos - 1]);
        while pos > 0 && class(chars[pos - 1]) == word_class {
            pos -= 1;
        }
    }
    pos
}

/// Vi `e` (or `E`): last char of the current or next word.
#[must_use]
pub fn vi_forward_word_end(chars: &[char], pos: usize, big_word: bool) -> usize {
    let class = class_fn(big_word);
    let len = chars.len();
    if len == 0 {
        return 0;
    }
    let mut pos = (pos + 1).min(len);
    while pos < len && class(chars[pos]) == ViCharClass::Blank {
        pos += 1;
    }
    if pos >= len {
        return len - 1;
    }
    let word_class = class(chars[pos]);
    while pos + 1 < len && class(chars[pos + 1]) == word_class {
        pos += 1;
    }
    pos
}

/// Vi `ge` (or `gE`): last char of the previous word.
#[must_use]
pub fn vi_backward_word_end(chars: &[char], pos: usize, big_word: bool) -> usize {
    let class = class_fn(big_word);
    let mut pos = pos.min(chars.len().saturating_sub(1));
    if chars.is_empty() {
        return 0;
    }
    let start_class = class(chars[pos]);
    if start_class != ViCharClass::Blank {
        while pos > 0 && class(chars[pos]) == start_class {
            pos -= 1;
        }
    }
    while pos > 0 && class(chars[pos]) == ViCharClass::Blank {
        pos -= 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn chars(text: &str) -> Vec<char> { text.chars().collect() }

    fn alnum(ch: char) -> bool { ch.is_alphanumeric() }

    #[test]
    fn test_emacs_forward_and_backward() {
        let buf = chars("foo bar-baz  qux");
        assert_eq!(forward_word_end(&buf, 0, alnum), 3);
        assert_eq!(forward_word_end(&buf, 3, alnum), 7);
        assert_eq!(backward_word_start(&buf, 16, alnum), 13);
        assert_eq!(backward_word_start(&buf, 13, alnum), 8);

        let with_dash = |ch| is_word_char(ch, "-");
        assert_eq!(forward_word_end(&buf, 3, with_dash), 11);
    }

    #[test_case("foo.bar baz", 0, false, 3)]
    #[test_case("foo.bar baz", 3, false, 4)]
    #[test_case("foo.bar baz", 0, true, 8)]
    #[test_case("foo   ", 0, false, 6)]
    fn test_vi_forward_word(text: &str, pos: usize, big: bool, expected: usize) {
        assert_eq!(vi_forward_word(&chars(text), pos, big), expected);
    }

    #[test_case("foo.bar baz", 8, false, 4)]
    #[test_case("foo.bar baz", 8, true, 0)]
    #[test_case("foo.bar baz", 11, false, 8)]
    fn test_vi_backward_word(text: &str, pos: usize, big: bool, expected: usize) {
        assert_eq!(vi_backward_word(&chars(text), pos, big), expected);
    }

    #[test_case("foo bar", 0, false, 2)]
    #[test_case("foo bar", 2, false, 6)]
    #[test_case("a.b c", 0, true, 2)]
    fn test_vi_forward_word_end(text: &str, pos: usize, big: bool, expected: usize) {
        assert_eq!(vi_forward_word_end(&chars(text), pos, big), expected);
    }

    #[test]
    fn test_vi_backward_word_end() {
        let buf = chars("foo bar baz");
        assert_eq!(vi_backward_word_end(&buf, 9, false), 6);
        assert_eq!(vi_backward_word_end(&buf, 6, false), 2);
    }

    #[test]
    fn test_word_at() {
        let buf = chars("hello world");
        assert_eq!(word_at(&buf, 2, alnum), (0, 5));
        assert_eq!(word_at(&buf, 5, alnum), (6, 11));
    }
}
