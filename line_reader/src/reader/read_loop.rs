// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::cursor;

use super::{EditState, HIDDEN_MASK, ScreenState};
use crate::{Buffer, DEFAULT_AMBIGUOUS_BINDING_MS, DEFAULT_HISTORY_SIZE, EditMode,
            HistoryPolicy, LineReader, LineReaderOption, PromptTemplate, ReadlineError,
            ReadlineEvent, Resolution, ResolverConfig, Unwind, WidgetName, keymap_names,
            lock_output_device_as_mut, resolve_binding, variable_names};

impl LineReader {
    /// Read one line.
    ///
    /// - `prompt` and `right_prompt` are templates (see [`crate::PromptTemplate`]).
    ///   The right prompt is drawn on the first row when it fits.
    /// - `mask` draws every char as the given one. `'\0'` hides the input entirely.
    ///   Masked lines are not added to history.
    /// - `buffer` is the initial text, with the cursor at its end.
    ///
    /// The mode starts from the `keymap` variable if it names an editing keymap, and
    /// from `editing-mode` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails. Interrupts and end of input are
    /// [`ReadlineEvent`]s, not errors.
    pub fn read_line(
        &mut self,
        prompt: Option<&str>,
        right_prompt: Option<&str>,
        mask: Option<char>,
        buffer: Option<&str>,
    ) -> Result<ReadlineEvent, ReadlineError> {
        self.start_read(prompt, right_prompt, mask, buffer)?;

        let outcome = self
            .run_callback(WidgetName::CallbackInit)
            .and_then(|()| {
                self.redisplay()?;
                self.edit_loop()
            });

        match outcome {
            Ok(()) => self.accept_read(),
            Err(Unwind::Interrupted) => {
                let partial_line = self.state.buffer.text();
                tracing::debug!(message = "read interrupted", chars = partial_line.chars().count());
                self.finish_display()?;
                Ok(ReadlineEvent::Interrupted { partial_line })
            }
            Err(Unwind::EndOfInput) if self.state.buffer.is_empty() => {
                tracing::debug!(message = "end of input");
                self.finish_display()?;
                Ok(ReadlineEvent::Eof)
            }
            Err(Unwind::EndOfInput) => self.accept_read(),
            Err(Unwind::Fatal(error)) => {
                tracing::error!(message = "read failed", ?error);
                Err(error)
            }
        }
    }

    /// Resolve and dispatch bindings until a line is accepted. Nested loops
    /// (`recursive-edit`) return to their caller the same way.
    pub(crate) fn edit_loop(&mut self) -> Result<(), Unwind> {
        loop {
            if std::mem::take(&mut self.state.accepted) {
                return Ok(());
            }
            match self.read_binding()? {
                Resolution::EndOfInput => return Err(Unwind::EndOfInput),
                Resolution::Unmatched { keys } => {
                    // Only the menu resolves without fallbacks. Leave it, then
                    // read the keys again in the mode underneath.
                    self.input.push_front_keys(&keys);
                    self.close_menu();
                    continue;
                }
                Resolution::Bound { binding, keys } => {
                    self.state.keys = keys;
                    self.dispatch(&binding)?;
                }
            }
            if !self.input.has_pending() && !self.state.accepted {
                self.redisplay()?;
            }
        }
    }

    pub(crate) fn read_binding(&mut self) -> Result<Resolution, Unwind> {
        let mode = self.state.mode.mode();
        let ambiguous_timeout = self
            .variables
            .get_millis(variable_names::AMBIGUOUS_BINDING, DEFAULT_AMBIGUOUS_BINDING_MS);
        let layers = self.keymaps.layers(mode.keymap_layers());
        let config = ResolverConfig {
            layers: &layers,
            safe: self.keymaps.get(keymap_names::SAFE),
            ambiguous_timeout,
            allow_fallback: mode != EditMode::Menu,
        };
        Ok(resolve_binding(&mut self.input, &config)?)
    }

    fn initial_mode(&self) -> EditMode {
        let keymap = self.variables.get_string(variable_names::KEYMAP, "");
        if let Some(mode) = EditMode::from_keymap_name(&keymap) {
            return mode;
        }
        match self
            .variables
            .get_string(variable_names::EDITING_MODE, "emacs")
            .as_str()
        {
            "vi" => EditMode::ViInsert,
            _ => EditMode::Emacs,
        }
    }

    fn start_read(
        &mut self,
        prompt: Option<&str>,
        right_prompt: Option<&str>,
        mask: Option<char>,
        buffer: Option<&str>,
    ) -> Result<(), ReadlineError> {
        let mode = self.initial_mode();
        self.state = EditState::new(mode, self.undo_coalescing);
        self.state.prompt = PromptTemplate::parse(prompt.unwrap_or_default());
        self.state.right_prompt = right_prompt.map(PromptTemplate::parse);
        self.state.mask = mask;
        self.state.buffer = Buffer::from_text(buffer.unwrap_or_default());
        self.screen = ScreenState::default();

        let history_size = self
            .variables
            .get_int(variable_names::HISTORY_SIZE, DEFAULT_HISTORY_SIZE);
        self.history
            .set_max_size(usize::try_from(history_size).unwrap_or(0));
        self.history.move_to_end();

        tracing::debug!(
            message = "read line",
            mode = %mode,
            masked = mask.is_some(),
            hidden = mask == Some(HIDDEN_MASK)
        );
        self.fresh_line()
    }

    /// Start on column 0 when `AUTO_FRESH_LINE` is set and something is left on the
    /// cursor's row.
    fn fresh_line(&mut self) -> Result<(), ReadlineError> {
        if !self.is_set(LineReaderOption::AutoFreshLine) || self.output.is_mock {
            return Ok(());
        }
        if let Ok((column, _)) = cursor::position()
            && column > 0
        {
            let term = lock_output_device_as_mut!(self.output);
            term.write_all(b"\r\n")?;
        }
        Ok(())
    }

    fn accept_read(&mut self) -> Result<ReadlineEvent, ReadlineError> {
        match self.run_callback(WidgetName::CallbackFinish) {
            Err(Unwind::Fatal(error)) => return Err(error),
            Err(unwind) => tracing::debug!(message = "callback-finish unwound", ?unwind),
            Ok(()) => {}
        }
        let line = self.state.buffer.text();
        self.add_to_history(&line);
        self.finish_display()?;
        tracing::debug!(message = "line accepted", chars = line.chars().count());
        Ok(ReadlineEvent::Line(line))
    }

    pub(crate) fn history_policy(&self) -> HistoryPolicy {
        let ignore = self
            .variables
            .get_string(variable_names::HISTORY_IGNORE, "");
        HistoryPolicy {
            ignore_space: self.is_set(LineReaderOption::HistoryIgnoreSpace),
            ignore_dups: self.is_set(LineReaderOption::HistoryIgnoreDups),
            reduce_blanks: self.is_set(LineReaderOption::HistoryReduceBlanks),
            ignore_patterns: ignore
                .split('|')
                .filter(|it| !it.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }

    fn add_to_history(&mut self, line: &str) {
        if self.state.mask.is_some()
            || self
                .variables
                .get_bool(variable_names::DISABLE_HISTORY, false)
        {
            return;
        }
        let policy = self.history_policy();
        let added = self.history.add(line, &policy);
        tracing::debug!(message = "history add", added, entries = self.history.len());
    }
}
