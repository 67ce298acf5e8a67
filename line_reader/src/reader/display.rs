// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Redisplay. Every frame is drawn from scratch: go back to the first row of the
//! previous frame, clear down, then paint the prompt, the buffer (with continuation
//! prompts and the right prompt), and whatever is shown below it.

use std::{io,
          thread,
          time::Duration};

use crossterm::{QueueableCommand,
                cursor,
                style::ContentStyle,
                terminal::{Clear,
                           ClearType::{All, FromCursorDown}}};

use crate::{DEFAULT_SECONDARY_PROMPT_PATTERN, HighlightRequest, LineReader,
            LineReaderOption, PromptContext, PromptTemplate, display_width,
            lock_output_device_as_mut, ok, render_char, variable_names};

pub(crate) const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// A mask char that hides the input entirely.
pub(crate) const HIDDEN_MASK: char = '\0';

const VISIBLE_BELL_ON: &[u8] = b"\x1b[?5h";
const VISIBLE_BELL_OFF: &[u8] = b"\x1b[?5l";
const VISIBLE_BELL_DURATION: Duration = Duration::from_millis(100);

/// What the last redisplay left on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScreenState {
    /// Row of the terminal cursor, counted from the first row of the prompt.
    pub cursor_row: usize,
}

/// A painted frame and where the terminal cursor goes afterwards.
#[derive(Debug, Default)]
struct Frame {
    text: String,
    cursor: (usize, usize),
    end_row: usize,
}

/// Lays text out in rows `width` columns wide and tracks where the next char lands.
#[derive(Debug)]
struct Painter {
    width: usize,
    delay_line_wrap: bool,
    row: usize,
    col: usize,
    out: String,
}

impl Painter {
    fn new(width: usize, delay_line_wrap: bool) -> Self {
        Self {
            width: width.max(1),
            delay_line_wrap,
            row: 0,
            col: 0,
            out: String::new(),
        }
    }

    /// Where the next char will be drawn.
    fn position(&self) -> (usize, usize) {
        match self.col >= self.width {
            true if self.delay_line_wrap => (self.row, self.width - 1),
            true => (self.row + 1, 0),
            false => (self.row, self.col),
        }
    }

    fn newline(&mut self) {
        self.out.push_str("\r\n");
        self.row += 1;
        self.col = 0;
    }

    /// Buffer text, wrapped one char at a time.
    fn text(&mut self, text: &str, style: ContentStyle) {
        let mut run = String::new();
        for ch in text.chars() {
            let shown = render_char(ch);
            let width = display_width(&shown);
            if self.col > 0 && self.col + width > self.width {
                self.flush_run(&mut run, style);
                self.newline();
            }
            run.push_str(&shown);
            self.col += width;
        }
        self.flush_run(&mut run, style);
    }

    fn flush_run(&mut self, run: &mut String, style: ContentStyle) {
        if run.is_empty() {
            return;
        }
        if style == ContentStyle::new() {
            self.out.push_str(run);
        } else {
            self.out.push_str(&style.apply(run.as_str()).to_string());
        }
        run.clear();
    }

    /// Prompt or message text that may carry ANSI sequences and newlines. The terminal
    /// wraps it.
    fn styled(&mut self, text: &str) {
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                self.newline();
            }
            self.out.push_str(line);
            self.col += display_width(line);
            while self.col > self.width {
                self.row += 1;
                self.col -= self.width;
            }
        }
    }

    fn pad(&mut self, count: usize) {
        self.out.extend(std::iter::repeat_n(' ', count));
        self.col += count;
    }

    /// Make sure the end position is a real cell.
    fn finish(&mut self) {
        if self.col >= self.width && !self.delay_line_wrap {
            self.newline();
        }
    }
}

impl LineReader {
    pub(crate) fn terminal_width(&self) -> usize {
        self.input
            .terminal_width()
            .map_or(DEFAULT_TERMINAL_WIDTH, usize::from)
            .max(1)
    }

    fn line_offset(&self) -> usize {
        usize::try_from(self.variables.get_int(variable_names::LINE_OFFSET, 0)).unwrap_or(0)
    }

    /// Draw the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the output device fails.
    pub(crate) fn redisplay(&mut self) -> io::Result<()> {
        let frame = self.compose_frame();
        let clear_screen = std::mem::take(&mut self.state.clear_screen);
        let rows_up = u16::try_from(self.screen.cursor_row).unwrap_or(u16::MAX);

        let term = lock_output_device_as_mut!(self.output);
        term.queue(cursor::MoveToColumn(0))?;
        if clear_screen {
            term.queue(Clear(All))?.queue(cursor::MoveTo(0, 0))?;
        } else if rows_up > 0 {
            term.queue(cursor::MoveUp(rows_up))?;
        }
        term.queue(Clear(FromCursorDown))?;
        term.write_all(frame.text.as_bytes())?;

        let (cursor_row, cursor_col) = frame.cursor;
        let back_up = frame.end_row.saturating_sub(cursor_row);
        if back_up > 0 {
            term.queue(cursor::MoveUp(u16::try_from(back_up).unwrap_or(u16::MAX)))?;
        }
        term.queue(cursor::MoveToColumn(
            u16::try_from(cursor_col).unwrap_or(u16::MAX),
        ))?;
        term.flush()?;

        self.screen.cursor_row = cursor_row;
        ok!()
    }

    /// Draw the line one last time without any decorations and move below it.
    pub(crate) fn finish_display(&mut self) -> io::Result<()> {
        self.state.post = None;
        self.state.minibuffer = None;
        self.state.search_term = None;
        self.state.menu = None;
        self.state.clear_region();
        let end = self.state.buffer.len();
        self.state.buffer.set_cursor(end);
        self.redisplay()?;

        let term = lock_output_device_as_mut!(self.output);
        term.write_all(b"\r\n")?;
        term.flush()?;
        self.screen = ScreenState::default();
        ok!()
    }

    /// Ring the bell the way `bell-style` says. Counted even when silent.
    pub(crate) fn beep(&mut self) -> io::Result<()> {
        self.bell_count += 1;
        let style = self
            .variables
            .get_string(variable_names::BELL_STYLE, "audible")
            .to_lowercase();
        let visible = style == "visible"
            || self
                .variables
                .get_bool(variable_names::PREFER_VISIBLE_BELL, false);
        tracing::debug!(message = "bell", style = %style, visible);
        if matches!(style.as_str(), "none" | "off") {
            return ok!();
        }

        let is_mock = self.output.is_mock;
        let term = lock_output_device_as_mut!(self.output);
        if visible {
            term.write_all(VISIBLE_BELL_ON)?;
            term.flush()?;
            if !is_mock {
                thread::sleep(VISIBLE_BELL_DURATION);
            }
            term.write_all(VISIBLE_BELL_OFF)?;
        } else {
            term.write_all(b"\x07")?;
        }
        term.flush()?;
        ok!()
    }

    /// Style of each buffer char.
    fn char_styles(&self) -> Vec<ContentStyle> {
        let len = self.state.buffer.len();
        if self.state.mask.is_some() {
            return vec![ContentStyle::new(); len];
        }
        let text = self.state.buffer.text();
        let spans = self.highlighter.highlight(&HighlightRequest {
            buffer: &text,
            region: self.state.active_region(),
            search_term: self.state.search_term.as_deref(),
        });
        let mut styles: Vec<ContentStyle> = spans
            .iter()
            .flat_map(|span| std::iter::repeat_n(span.style, span.text.chars().count()))
            .collect();
        styles.resize(len, ContentStyle::new());
        styles
    }

    fn compose_frame(&self) -> Frame {
        let mut painter =
            Painter::new(self.terminal_width(), self.is_set(LineReaderOption::DelayLineWrap));
        let line_offset = self.line_offset();
        let missing = self.state.missing.as_str();
        let primary = self.state.prompt.render(&PromptContext {
            line_number: line_offset + 1,
            missing,
            primary_width: 0,
        });
        let secondary = PromptTemplate::parse(&self.variables.get_string(
            variable_names::SECONDARY_PROMPT_PATTERN,
            DEFAULT_SECONDARY_PROMPT_PATTERN,
        ));

        painter.styled(&primary.text);
        let first_row = painter.row;

        let styles = self.char_styles();
        let chars = self.state.buffer.chars();
        let cursor = self.state.buffer.cursor();
        let mut cursor_position = None;
        let mut line_index = 0;
        for (index, ch) in chars.iter().enumerate() {
            if index == cursor {
                cursor_position = Some(painter.position());
            }
            if *ch == '\n' {
                if line_index == 0 {
                    self.paint_right_prompt(&mut painter, first_row);
                }
                line_index += 1;
                painter.newline();
                let rendered = secondary.render(&PromptContext {
                    line_number: line_offset + line_index + 1,
                    missing,
                    primary_width: primary.width,
                });
                painter.styled(&rendered.text);
                continue;
            }
            match self.state.mask {
                Some(HIDDEN_MASK) => {}
                Some(mask) => painter.text(&mask.to_string(), styles[index]),
                None => painter.text(&ch.to_string(), styles[index]),
            }
        }
        if cursor >= chars.len() {
            cursor_position = Some(painter.position());
        }
        if line_index == 0 {
            self.paint_right_prompt(&mut painter, first_row);
        }

        for extra in [&self.state.minibuffer, &self.state.post]
            .into_iter()
            .flatten()
        {
            for line in extra.lines() {
                painter.newline();
                painter.styled(line);
            }
        }
        painter.finish();

        Frame {
            cursor: cursor_position.unwrap_or_default(),
            end_row: painter.row,
            text: painter.out,
        }
    }

    /// Right aligned on the first buffer row, one column short of the edge, and only
    /// if it fits.
    fn paint_right_prompt(&self, painter: &mut Painter, first_row: usize) {
        let Some(template) = &self.state.right_prompt else {
            return;
        };
        let rendered = template.render(&PromptContext {
            line_number: self.line_offset() + 1,
            missing: &self.state.missing,
            primary_width: 0,
        });
        if rendered.text.contains('\n')
            || painter.row != first_row
            || painter.col + rendered.width + 2 > painter.width
        {
            return;
        }
        let start = painter.width - 1 - rendered.width;
        painter.pad(start - painter.col);
        painter.styled(&rendered.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Buffer, OutputDevice, ScriptedKeySource, StdoutMock};
    use pretty_assertions::assert_eq;

    fn reader(width: u16) -> (LineReader, StdoutMock) {
        let (output, stdout_mock) = OutputDevice::new_mock();
        let reader = LineReader::builder()
            .set_key_source(ScriptedKeySource::default().with_width(width))
            .set_output_device(output)
            .build()
            .unwrap();
        (reader, stdout_mock)
    }

    #[test]
    fn test_painter_wraps_and_tracks_position() {
        let mut painter = Painter::new(4, false);
        painter.text("abcdef", ContentStyle::new());
        assert_eq!(painter.out, "abcd\r\nef");
        assert_eq!(painter.position(), (1, 2));

        let mut painter = Painter::new(4, false);
        painter.text("abcd", ContentStyle::new());
        assert_eq!(painter.position(), (1, 0));
        painter.finish();
        assert_eq!(painter.row, 1);

        let mut painter = Painter::new(4, true);
        painter.text("abcd", ContentStyle::new());
        assert_eq!(painter.position(), (0, 3));
    }

    #[test]
    fn test_frame_with_continuation_and_right_prompt() {
        let (mut reader, _) = reader(30);
        reader.state.prompt = PromptTemplate::parse("%N> ");
        reader.state.right_prompt = Some(PromptTemplate::parse("[rp]"));
        reader.state.buffer = Buffer::from_text("one\ntwo");
        reader.set_variable(variable_names::SECONDARY_PROMPT_PATTERN, "%P.");

        let frame = reader.compose_frame();
        let expected_first = format!("1> one{}[rp]", " ".repeat(30 - 1 - 4 - 6));
        assert_eq!(frame.text, format!("{expected_first}\r\n...two"));
        assert_eq!(frame.cursor, (1, 6));
        assert_eq!(frame.end_row, 1);
    }

    #[test]
    fn test_mask_and_post_lines() {
        let (mut reader, _) = reader(80);
        reader.state.prompt = PromptTemplate::parse("pw: ");
        reader.state.mask = Some('*');
        reader.state.buffer = Buffer::from_text("secret");
        reader.state.buffer.set_cursor(2);
        reader.state.post = Some("a\nb".to_string());

        let frame = reader.compose_frame();
        assert_eq!(frame.text, "pw: ******\r\na\r\nb");
        assert_eq!(frame.cursor, (0, 6));
        assert_eq!(frame.end_row, 2);

        reader.state.mask = Some(HIDDEN_MASK);
        reader.state.post = None;
        assert_eq!(reader.compose_frame().text, "pw: ");
    }

    #[test]
    fn test_redisplay_moves_back_to_the_cursor() {
        let (mut reader, stdout_mock) = reader(80);
        reader.state.prompt = PromptTemplate::parse("> ");
        reader.state.buffer = Buffer::from_text("hi");
        reader.state.post = Some("listing".to_string());
        reader.redisplay().unwrap();

        assert_eq!(reader.screen.cursor_row, 0);
        let raw = stdout_mock.get_copy_of_buffer_as_string();
        assert!(raw.contains("> hi\r\nlisting"));
        // Back up one row, then to the column after "> hi".
        assert!(raw.ends_with("\x1b[1A\x1b[5G"));
    }

    #[test]
    fn test_bell_styles() {
        let (mut reader, stdout_mock) = reader(80);
        reader.beep().unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "\x07");

        stdout_mock.clear();
        reader.set_variable(variable_names::BELL_STYLE, "none");
        reader.beep().unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");
        assert_eq!(reader.bell_count(), 2);
    }
}
