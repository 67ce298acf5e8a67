// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter, Result as FmtResult},
          sync::Arc};

use strum::IntoEnumIterator;

use super::{EditState, ScreenState};
use crate::{Buffer, Completer, EditMode, Expander, Highlighter, History, InputDevice,
            KeyMaps, KeyPress, KillRing, LineReaderBuilder, LineReaderOption, Options,
            OutputDevice, ParseContext, ParsedLine, Parser, ReadlineError, RegionType,
            UndoCoalescing, VariableValue, Variables, WidgetName, WidgetRef,
            WidgetRegistry, WidgetResult, call_builtin, parse_key_seq, variable_names};

/// The line editor. Owns the devices, the keymaps, the settings, the collaborators, and
/// the state of the line being read.
///
/// Build one with [`LineReader::builder`], then call [`LineReader::read_line`] in a
/// loop. Between calls (and from inside user widgets) the accessors here expose the
/// buffer, options, variables, keymaps, and the parsed line.
pub struct LineReader {
    pub(crate) input: InputDevice,
    pub(crate) output: OutputDevice,
    pub(crate) keymaps: KeyMaps,
    pub(crate) options: Options,
    pub(crate) variables: Variables,
    pub(crate) widgets: WidgetRegistry,
    pub(crate) history: Box<dyn History>,
    /// History length when the reader was built. Entries from here on were added by
    /// this reader, and are all that `set-local-history` lets navigation see.
    pub(crate) local_history_start: usize,
    pub(crate) completer: Option<Box<dyn Completer>>,
    pub(crate) parser: Box<dyn Parser>,
    pub(crate) highlighter: Box<dyn Highlighter>,
    pub(crate) expander: Box<dyn Expander>,
    pub(crate) undo_coalescing: UndoCoalescing,
    pub(crate) screen: ScreenState,
    pub(crate) state: EditState,
    pub(crate) bell_count: usize,
}

impl Debug for LineReader {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LineReader")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("mode", &self.state.mode.mode())
            .field("buffer", &self.state.buffer)
            .field("widgets", &self.widgets)
            .field("history", &self.history)
            .field("has_completer", &self.completer.is_some())
            .finish_non_exhaustive()
    }
}

impl LineReader {
    #[must_use]
    pub fn builder() -> LineReaderBuilder { LineReaderBuilder::new() }

    /// Run the widget called `name`: a user widget if one is registered under that
    /// name, the built-in otherwise. An unknown name is logged and returns
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::Unwind`] when the widget interrupts the read or ends it.
    pub fn call_widget(&mut self, name: &str) -> WidgetResult {
        self.invoke(&WidgetRef::from_name(name))
    }

    /// Run a built-in even when a user widget shadows it. This is how a user widget
    /// wraps the built-in it replaces.
    ///
    /// # Errors
    ///
    /// See [`LineReader::call_widget`].
    pub fn call_builtin_widget(&mut self, widget: WidgetName) -> WidgetResult {
        call_builtin(self, widget)
    }

    pub fn register_widget(
        &mut self,
        name: &str,
        widget: impl Fn(&mut LineReader) -> WidgetResult + Send + Sync + 'static,
    ) {
        self.widgets.register(name, Arc::new(widget));
    }

    /// Returns `false` if nothing was registered under `name`.
    pub fn unregister_widget(&mut self, name: &str) -> bool {
        self.widgets.unregister(name).is_some()
    }

    #[must_use]
    pub fn widgets(&self) -> &WidgetRegistry { &self.widgets }

    /// The fixed catalogue of built-in widgets.
    pub fn builtin_widgets() -> impl Iterator<Item = WidgetName> { WidgetName::iter() }

    #[must_use]
    pub fn options(&self) -> &Options { &self.options }

    pub fn options_mut(&mut self) -> &mut Options { &mut self.options }

    #[must_use]
    pub fn is_set(&self, option: LineReaderOption) -> bool { self.options.is_set(option) }

    pub fn set_opt(&mut self, option: LineReaderOption) { self.options.set(option); }

    pub fn unset_opt(&mut self, option: LineReaderOption) { self.options.unset(option); }

    #[must_use]
    pub fn variables(&self) -> &Variables { &self.variables }

    pub fn variables_mut(&mut self) -> &mut Variables { &mut self.variables }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&VariableValue> { self.variables.get(name) }

    pub fn set_variable(&mut self, name: &str, value: impl Into<VariableValue>) {
        self.variables.set(name, value);
    }

    #[must_use]
    pub fn keymaps(&self) -> &KeyMaps { &self.keymaps }

    pub fn keymaps_mut(&mut self) -> &mut KeyMaps { &mut self.keymaps }

    /// Name of the keymap the current mode reads.
    #[must_use]
    pub fn keymap(&self) -> &'static str { self.state.mode.mode().keymap_name() }

    /// Switch to the editing keymap `name` (`emacs`, `viins`, `vicmd`, ...). Also
    /// recorded in the `keymap` variable, so the next [`LineReader::read_line`] starts
    /// there.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not an editing keymap.
    pub fn set_keymap(&mut self, name: &str) -> Result<(), ReadlineError> {
        let mode = EditMode::from_keymap_name(name)
            .ok_or_else(|| ReadlineError::UnknownKeymap(name.to_string()))?;
        self.variables.set(variable_names::KEYMAP, name);
        self.state.mode.set_mode(mode);
        Ok(())
    }

    #[must_use]
    pub fn mode(&self) -> EditMode { self.state.mode.mode() }

    #[must_use]
    pub fn buffer(&self) -> &Buffer { &self.state.buffer }

    pub fn buffer_mut(&mut self) -> &mut Buffer { &mut self.state.buffer }

    #[must_use]
    pub fn history(&self) -> &dyn History { self.history.as_ref() }

    pub fn history_mut(&mut self) -> &mut dyn History { self.history.as_mut() }

    #[must_use]
    pub fn kill_ring(&self) -> &KillRing { &self.state.kill_ring }

    /// The buffer as the parser sees it for completion. `None` if the parser rejects
    /// it.
    #[must_use]
    pub fn parsed_line(&self) -> Option<ParsedLine> {
        self.parser
            .parse(
                &self.state.buffer.text(),
                self.state.buffer.cursor(),
                ParseContext::Complete,
            )
            .ok()
    }

    /// The term of the history search in progress.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> { self.state.search_term.as_deref() }

    /// [`RegionType::None`] unless a region is active.
    #[must_use]
    pub fn region_active(&self) -> RegionType {
        match self.state.buffer.mark() {
            Some(_) => self.state.region_type,
            None => RegionType::None,
        }
    }

    #[must_use]
    pub fn region_mark(&self) -> Option<usize> { self.state.buffer.mark() }

    /// Queue keys (in binding notation) to be read before the terminal's.
    ///
    /// # Errors
    ///
    /// Returns an error if `keys` is not valid key notation.
    pub fn run_macro(&mut self, keys: &str) -> Result<(), ReadlineError> {
        let keys = parse_key_seq(keys)?;
        self.input.push_back_keys(&keys);
        Ok(())
    }

    /// Show `message` below the buffer until the next widget runs.
    pub fn set_post_message(&mut self, message: Option<&str>) {
        self.state.post = message.map(ToString::to_string);
    }

    /// What `read-command` stored: the name of the widget bound to the keys it read.
    #[must_use]
    pub fn reply(&self) -> Option<&str> { self.state.reply.as_deref() }

    /// How many times the bell rang since the reader was built.
    #[must_use]
    pub fn bell_count(&self) -> usize { self.bell_count }

    /// The numeric argument for the widget being run, `1` if none was typed.
    #[must_use]
    pub fn count(&self) -> i32 { self.state.argument.count() }

    #[must_use]
    pub fn has_argument(&self) -> bool { self.state.argument.is_active() }

    /// Keys that invoked the widget being run.
    #[must_use]
    pub fn keys(&self) -> &[KeyPress] { &self.state.keys }

    #[must_use]
    pub fn last_widget(&self) -> Option<WidgetName> { self.state.last_widget }
}
