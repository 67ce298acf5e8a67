// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

/// Chars, cursor, and an optional mark.
///
/// Invariants, kept by every method:
/// - `0 <= cursor <= len`
/// - when the mark is set, `0 <= mark <= len`
///
/// Mutations at the edges are clamped. Whether hitting an edge is worth a bell is the
/// calling widget's decision, which is why motions report how far they actually moved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffer {
    chars: Vec<char>,
    cursor: usize,
    mark: Option<usize>,
    overwrite: bool,
}

/// Content and cursor, enough to put a [`Buffer`] back the way it was.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub chars: Vec<char>,
    pub cursor: usize,
}

impl BufferSnapshot {
    #[must_use]
    pub fn text(&self) -> String { self.chars.iter().collect() }
}

impl Buffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Buffer seeded with `text`, cursor at the end.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self {
            chars,
            cursor,
            mark: None,
            overwrite: false,
        }
    }

    #[must_use]
    pub fn text(&self) -> String { self.chars.iter().collect() }

    #[must_use]
    pub fn chars(&self) -> &[char] { &self.chars }

    #[must_use]
    pub fn len(&self) -> usize { self.chars.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.chars.is_empty() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn char_at(&self, pos: usize) -> Option<char> { self.chars.get(pos).copied() }

    /// The char under the cursor.
    #[must_use]
    pub fn current_char(&self) -> Option<char> { self.char_at(self.cursor) }

    /// The char before the cursor.
    #[must_use]
    pub fn prev_char(&self) -> Option<char> {
        self.cursor.checked_sub(1).and_then(|pos| self.char_at(pos))
    }

    #[must_use]
    pub fn substring(&self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        self.chars[range].iter().collect()
    }

    /// Move the cursor to `pos`, clamped. Returns `true` if `pos` was in range.
    pub fn set_cursor(&mut self, pos: usize) -> bool {
        let in_range = pos <= self.len();
        self.cursor = pos.min(self.len());
        in_range
    }

    /// Move the cursor by `delta`, clamped. Returns the distance actually moved.
    pub fn move_cursor(&mut self, delta: isize) -> isize {
        let target = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.len());
        #[allow(clippy::cast_possible_wrap)]
        let moved = target as isize - self.cursor as isize;
        self.cursor = target;
        moved
    }

    #[must_use]
    pub fn is_overwrite(&self) -> bool { self.overwrite }

    pub fn set_overwrite(&mut self, overwrite: bool) { self.overwrite = overwrite; }

    #[must_use]
    pub fn mark(&self) -> Option<usize> { self.mark }

    /// Set the mark at the cursor.
    pub fn set_mark(&mut self) { self.mark = Some(self.cursor); }

    pub fn set_mark_at(&mut self, pos: usize) { self.mark = Some(pos.min(self.len())); }

    pub fn clear_mark(&mut self) { self.mark = None; }

    /// Swap cursor and mark. Returns `false` if there is no mark.
    pub fn exchange_point_and_mark(&mut self) -> bool {
        let Some(mark) = self.mark else {
            return false;
        };
        self.mark = Some(self.cursor);
        self.cursor = mark;
        true
    }

    /// Insert at the cursor and advance past it. In overwrite mode, existing chars are
    /// replaced in place until the end of the buffer, after which the rest is appended.
    pub fn insert(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert_char(ch);
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if self.overwrite && self.cursor < self.len() {
            self.chars[self.cursor] = ch;
        } else {
            self.chars.insert(self.cursor, ch);
            if let Some(mark) = self.mark
                && mark > self.cursor
            {
                self.mark = Some(mark + 1);
            }
        }
        self.cursor += 1;
    }

    /// Insert without moving the cursor.
    pub fn insert_after_cursor(&mut self, text: &str) {
        let cursor = self.cursor;
        let overwrite = self.overwrite;
        self.overwrite = false;
        self.insert(text);
        self.overwrite = overwrite;
        self.cursor = cursor;
    }

    /// Remove `a..b` (in either order, clamped) and return the removed text. The cursor
    /// and mark keep pointing at the same chars, or collapse to `a` if they were inside.
    pub fn delete_range(&mut self, a: usize, b: usize) -> String {
        let range = self.clamp_range(a.min(b)..a.max(b));
        if range.is_empty() {
            return String::new();
        }
        let removed: String = self.chars.drain(range.clone()).collect();
        let shift = |pos: usize| {
            if pos >= range.end {
                pos - range.len()
            } else if pos > range.start {
                range.start
            } else {
                pos
            }
        };
        self.cursor = shift(self.cursor);
        self.mark = self.mark.map(shift);
        removed
    }

    /// Delete up to `count` chars after the cursor.
    pub fn delete(&mut self, count: usize) -> String {
        let end = self.cursor.saturating_add(count);
        self.delete_range(self.cursor, end)
    }

    /// Delete up to `count` chars before the cursor.
    pub fn backspace(&mut self, count: usize) -> String {
        let start = self.cursor.saturating_sub(count);
        self.delete_range(start, self.cursor)
    }

    /// Replace the whole content, cursor at the end, mark cleared.
    pub fn replace_all(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
        self.mark = None;
    }

    /// Replace `range` with `text`, leaving the cursor after the inserted text.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let range = self.clamp_range(range);
        self.delete_range(range.start, range.end);
        self.cursor = range.start;
        let overwrite = self.overwrite;
        self.overwrite = false;
        self.insert(text);
        self.overwrite = overwrite;
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
        self.mark = None;
    }

    #[must_use]
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            chars: self.chars.clone(),
            cursor: self.cursor,
        }
    }

    pub fn restore(&mut self, snapshot: &BufferSnapshot) {
        self.chars.clone_from(&snapshot.chars);
        self.cursor = snapshot.cursor.min(self.chars.len());
        if let Some(mark) = self.mark {
            self.mark = Some(mark.min(self.chars.len()));
        }
    }

    /// Index of the first char of the line containing `pos`.
    #[must_use]
    pub fn line_start(&self, pos: usize) -> usize {
        let pos = pos.min(self.len());
        self.chars[..pos]
            .iter()
            .rposition(|ch| *ch == '\n')
            .map_or(0, |it| it + 1)
    }

    /// Index of the newline ending the line containing `pos`, or the buffer length.
    #[must_use]
    pub fn line_end(&self, pos: usize) -> usize {
        let pos = pos.min(self.len());
        self.chars[pos..]
            .iter()
            .position(|ch| *ch == '\n')
            .map_or(self.len(), |it| pos + it)
    }

    #[must_use]
    pub fn is_multiline(&self) -> bool { self.chars.contains(&'\n') }

    /// Zero based (line, column) of the cursor.
    #[must_use]
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let line = self.chars[..self.cursor].iter().filter(|ch| **ch == '\n').count();
        (line, self.cursor - self.line_start(self.cursor))
    }

    /// Move to the same column on the previous line. Returns `false` on the first line.
    pub fn up_line(&mut self) -> bool {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return false;
        }
        let column = self.cursor - start;
        let prev_start = self.line_start(start - 1);
        self.cursor = (prev_start + column).min(start - 1);
        true
    }

    /// Move to the same column on the next line. Returns `false` on the last line.
    pub fn down_line(&mut self) -> bool {
        let end = self.line_end(self.cursor);
        if end >= self.len() {
            return false;
        }
        let column = self.cursor - self.line_start(self.cursor);
        let next_start = end + 1;
        self.cursor = (next_start + column).min(self.line_end(next_start));
        true
    }

    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let start = range.start.min(self.len());
        let end = range.end.min(self.len()).max(start);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_and_cursor() {
        let mut buffer = Buffer::new();
        buffer.insert("hello");
        buffer.move_cursor(-2);
        buffer.insert("XY");
        assert_eq!(buffer.text(), "helXYlo");
        assert_eq!(buffer.cursor(), 5);
    }

    #[test]
    fn test_overwrite_replaces_then_appends() {
        let mut buffer = Buffer::from_text("abc");
        buffer.set_cursor(1);
        buffer.set_overwrite(true);
        buffer.insert("XYZ");
        assert_eq!(buffer.text(), "aXYZ");
        assert_eq!(buffer.cursor(), 4);
    }

    #[test]
    fn test_move_cursor_is_clamped() {
        let mut buffer = Buffer::from_text("abc");
        assert_eq!(buffer.move_cursor(5), 0);
        assert_eq!(buffer.move_cursor(-10), -3);
        assert_eq!(buffer.cursor(), 0);
        assert!(!buffer.set_cursor(9));
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_delete_range_adjusts_cursor_and_mark() {
        let mut buffer = Buffer::from_text("0123456789");
        buffer.set_mark_at(8);
        buffer.set_cursor(5);
        let removed = buffer.delete_range(7, 2);
        assert_eq!(removed, "23456");
        assert_eq!(buffer.text(), "01789");
        assert_eq!(buffer.cursor(), 2);
        assert_eq!(buffer.mark(), Some(3));

        // Out of range is clamped, not an error.
        assert_eq!(buffer.delete_range(4, 99), "9");
        assert_eq!(buffer.delete_range(50, 99), "");
    }

    #[test]
    fn test_insert_before_mark_shifts_mark() {
        let mut buffer = Buffer::from_text("abc");
        buffer.set_mark_at(2);
        buffer.set_cursor(0);
        buffer.insert("xx");
        assert_eq!(buffer.mark(), Some(4));
        assert!(buffer.exchange_point_and_mark());
        assert_eq!(buffer.cursor(), 4);
        assert_eq!(buffer.mark(), Some(2));
    }

    #[test]
    fn test_lines() {
        let mut buffer = Buffer::from_text("ab\ncdef\ng");
        buffer.set_cursor(6);
        assert_eq!(buffer.cursor_line_col(), (1, 3));
        assert!(buffer.up_line());
        assert_eq!(buffer.cursor(), 2);
        assert!(!buffer.up_line());
        assert!(buffer.down_line());
        assert!(buffer.down_line());
        assert_eq!(buffer.cursor(), 9);
        assert!(!buffer.down_line());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut buffer = Buffer::from_text("abc");
        buffer.set_cursor(1);
        let snapshot = buffer.snapshot();
        buffer.insert("zzz");
        buffer.restore(&snapshot);
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 1);
    }
}
