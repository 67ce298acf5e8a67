// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter, Result as FmtResult},
          sync::Arc};

use super::{EditState, ScreenState};
use crate::{Completer, CrosstermKeySource, DefaultExpander, DefaultHighlighter,
            DefaultParser, EditMode, Expander, Highlighter, History, InputDevice, KeyMaps,
            KeySource, LineReader, LineReaderConfig, LineReaderOption, MemoryHistory,
            Options, OutputDevice, Parser, ReadlineError, UndoCoalescing, VariableValue,
            Variables, WidgetRegistry, WidgetResult, default_keymaps};

/// Assembles a [`LineReader`]. Anything not set gets a default: the terminal for input
/// and output, [`MemoryHistory`], [`DefaultParser`], [`DefaultHighlighter`],
/// [`DefaultExpander`], the default keymaps, and no completer.
///
/// ```rust
/// use r3bl_line_reader::{LineReader, LineReaderOption, OutputDevice, ScriptedKeySource};
///
/// let (output, _stdout_mock) = OutputDevice::new_mock();
/// let reader = LineReader::builder()
///     .set_key_source(ScriptedKeySource::from_text("ls\r"))
///     .set_output_device(output)
///     .set_option(LineReaderOption::CaseInsensitive, true)
///     .set_variable("bell-style", "none")
///     .build()
///     .unwrap();
/// assert!(reader.is_set(LineReaderOption::CaseInsensitive));
/// ```
pub struct LineReaderBuilder {
    input: Option<InputDevice>,
    output: Option<OutputDevice>,
    keymaps: Option<KeyMaps>,
    history: Option<Box<dyn History>>,
    completer: Option<Box<dyn Completer>>,
    parser: Option<Box<dyn Parser>>,
    highlighter: Option<Box<dyn Highlighter>>,
    expander: Option<Box<dyn Expander>>,
    config: Option<LineReaderConfig>,
    options: Vec<(LineReaderOption, bool)>,
    variables: Vec<(String, VariableValue)>,
    widgets: WidgetRegistry,
}

impl Debug for LineReaderBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LineReaderBuilder")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("variables", &self.variables)
            .field("widgets", &self.widgets)
            .finish_non_exhaustive()
    }
}

impl Default for LineReaderBuilder {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            keymaps: None,
            history: None,
            completer: None,
            parser: None,
            highlighter: None,
            expander: None,
            config: None,
            options: vec![],
            variables: vec![],
            widgets: WidgetRegistry::new(),
        }
    }
}

impl LineReaderBuilder {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn set_key_source(mut self, key_source: impl KeySource + 'static) -> Self {
        self.input = Some(InputDevice::new(key_source));
        self
    }

    #[must_use]
    pub fn set_input_device(mut self, input: InputDevice) -> Self {
        self.input = Some(input);
        self
    }

    #[must_use]
    pub fn set_output_device(mut self, output: OutputDevice) -> Self {
        self.output = Some(output);
        self
    }

    /// Start from these keymaps instead of [`default_keymaps`].
    #[must_use]
    pub fn set_keymaps(mut self, keymaps: KeyMaps) -> Self {
        self.keymaps = Some(keymaps);
        self
    }

    #[must_use]
    pub fn set_history(mut self, history: impl History + 'static) -> Self {
        self.history = Some(Box::new(history));
        self
    }

    #[must_use]
    pub fn set_completer(mut self, completer: impl Completer + 'static) -> Self {
        self.completer = Some(Box::new(completer));
        self
    }

    #[must_use]
    pub fn set_parser(mut self, parser: impl Parser + 'static) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    #[must_use]
    pub fn set_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Some(Box::new(highlighter));
        self
    }

    #[must_use]
    pub fn set_expander(mut self, expander: impl Expander + 'static) -> Self {
        self.expander = Some(Box::new(expander));
        self
    }

    /// Applied before the individual options and variables below, so those win.
    #[must_use]
    pub fn set_config(mut self, config: LineReaderConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn set_option(mut self, option: LineReaderOption, value: bool) -> Self {
        self.options.push((option, value));
        self
    }

    #[must_use]
    pub fn set_variable(mut self, name: &str, value: impl Into<VariableValue>) -> Self {
        self.variables.push((name.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn set_widget(
        mut self,
        name: &str,
        widget: impl Fn(&mut LineReader) -> WidgetResult + Send + Sync + 'static,
    ) -> Self {
        self.widgets.register(name, Arc::new(widget));
        self
    }

    /// Falls back to the terminal (raw mode) and stdout for devices that were not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or raw mode can't be entered.
    pub fn build(self) -> Result<LineReader, ReadlineError> {
        let input = match self.input {
            Some(input) => input,
            None => InputDevice::new(CrosstermKeySource::try_new()?),
        };
        let output = self.output.unwrap_or_else(OutputDevice::new_stdout);

        let mut keymaps = self.keymaps.unwrap_or_else(default_keymaps);
        let mut options = Options::new();
        let mut variables = Variables::new();
        let mut undo_coalescing = UndoCoalescing::default();
        if let Some(config) = &self.config {
            config.apply(&mut options, &mut variables, &mut keymaps)?;
            undo_coalescing = config.undo_coalescing.unwrap_or_default();
        }
        for (option, value) in self.options {
            options.set_to(option, value);
        }
        for (name, value) in self.variables {
            variables.set(&name, value);
        }

        tracing::debug!(
            message = "line reader built",
            is_mock = output.is_mock,
            widgets = self.widgets.len(),
            has_completer = self.completer.is_some()
        );

        let history = self
            .history
            .unwrap_or_else(|| Box::new(MemoryHistory::new()));
        Ok(LineReader {
            input,
            output,
            keymaps,
            options,
            variables,
            widgets: self.widgets,
            local_history_start: history.len(),
            history,
            completer: self.completer,
            parser: self
                .parser
                .unwrap_or_else(|| Box::new(DefaultParser::default())),
            highlighter: self
                .highlighter
                .unwrap_or_else(|| Box::new(DefaultHighlighter)),
            expander: self.expander.unwrap_or_else(|| Box::new(DefaultExpander)),
            undo_coalescing,
            screen: ScreenState::default(),
            state: EditState::new(EditMode::Emacs, undo_coalescing),
            bell_count: 0,
        })
    }

    /// Like [`LineReaderBuilder::build`], but always reads the terminal and writes
    /// stdout, ignoring any devices that were set.
    ///
    /// # Errors
    ///
    /// See [`LineReaderBuilder::build`].
    pub fn build_for_terminal(mut self) -> Result<LineReader, ReadlineError> {
        self.input = Some(InputDevice::new(CrosstermKeySource::try_new()?));
        self.output = Some(OutputDevice::new_stdout());
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScriptedKeySource, variable_names};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_individual_settings_win_over_config() {
        let config = LineReaderConfig::from_json_str(
            r#"{ "options": { "AUTO_MENU": false }, "variables": { "bell-style": "visible" } }"#,
        )
        .unwrap();
        let (output, _) = OutputDevice::new_mock();
        let reader = LineReaderBuilder::new()
            .set_key_source(ScriptedKeySource::default())
            .set_output_device(output)
            .set_config(config)
            .set_option(LineReaderOption::AutoMenu, true)
            .set_variable(variable_names::BELL_STYLE, "none")
            .set_widget("noop", |_reader| Ok(true))
            .build()
            .unwrap();

        assert!(reader.is_set(LineReaderOption::AutoMenu));
        assert_eq!(reader.variables().get_string(variable_names::BELL_STYLE, ""), "none");
        assert!(reader.widgets().contains("noop"));
        assert_eq!(reader.mode(), EditMode::Emacs);
    }

    #[test]
    fn test_bad_config_fails_the_build() {
        let config = LineReaderConfig::from_json_str(r#"{ "editing-mode": "ed" }"#).unwrap();
        let (output, _) = OutputDevice::new_mock();
        let result = LineReaderBuilder::new()
            .set_key_source(ScriptedKeySource::default())
            .set_output_device(output)
            .set_config(config)
            .build();
        assert!(matches!(result, Err(ReadlineError::Config(_))));
    }
}
