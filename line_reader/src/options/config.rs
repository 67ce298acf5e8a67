// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Binding, KeyMaps, KeySeqParseError, LineReaderOption, Options, UndoCoalescing,
            VariableValue, Variables, keymap_names, parse_key_seq, variable_names};

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("can't read config file")]
    #[diagnostic(code(line_reader::config::io))]
    Io(#[from] std::io::Error),

    #[error("config is not valid JSON")]
    #[diagnostic(code(line_reader::config::json))]
    Json(#[from] serde_json::Error),

    #[error("unknown keymap {0:?}")]
    #[diagnostic(
        code(line_reader::config::unknown_keymap),
        help("built-in keymaps are main, emacs, viins, vicmd, viopp, visual, menu, .safe")
    )]
    UnknownKeymap(String),

    #[error("unknown editing mode {0:?}")]
    #[diagnostic(code(line_reader::config::editing_mode), help("use \"emacs\" or \"vi\""))]
    UnknownEditingMode(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    KeySeq(#[from] KeySeqParseError),

    #[error("binding for {keys:?} needs exactly one of \"widget\" or \"insert\"")]
    #[diagnostic(code(line_reader::config::binding_target))]
    BindingTarget { keys: String },
}

/// One extra key binding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    #[serde(default = "default_binding_keymap")]
    pub keymap: String,
    /// Key notation, see [`crate::parse_key_seq`].
    pub keys: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<String>,
}

fn default_binding_keymap() -> String { keymap_names::MAIN.to_string() }

/// Settings loaded from JSON.
///
/// ```json
/// {
///   "editing-mode": "vi",
///   "undo-coalescing": "words",
///   "options": { "AUTO_MENU": false, "CASE_INSENSITIVE": true },
///   "variables": { "bell-style": "none", "ambiguous-binding": 300 },
///   "bindings": [
///     { "keymap": "emacs", "keys": "^X^E", "widget": "kill-buffer" },
///     { "keymap": "viins", "keys": "jk", "widget": "vi-cmd-mode" },
///     { "keys": "\\eh", "insert": "--help" }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LineReaderConfig {
    pub editing_mode: Option<String>,
    pub undo_coalescing: Option<UndoCoalescing>,
    pub options: FxHashMap<LineReaderOption, bool>,
    pub variables: FxHashMap<String, VariableValue>,
    pub bindings: Vec<BindingConfig>,
}

impl LineReaderConfig {
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns an error if the file can't be read or is not a valid config.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Apply everything to a reader's settings. Bindings are checked before any of
    /// them is added, so a bad binding leaves the keymaps untouched.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown editing mode, an unknown keymap, bad key
    /// notation, or a binding without a target.
    pub fn apply(
        &self,
        options: &mut Options,
        variables: &mut Variables,
        keymaps: &mut KeyMaps,
    ) -> Result<(), ConfigError> {
        if let Some(mode) = &self.editing_mode
            && mode != "emacs"
            && mode != "vi"
        {
            return Err(ConfigError::UnknownEditingMode(mode.clone()));
        }

        let mut bindings = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            if !keymaps.contains(&binding.keymap) {
                return Err(ConfigError::UnknownKeymap(binding.keymap.clone()));
            }
            let keys = parse_key_seq(&binding.keys)?;
            let target = match (&binding.widget, &binding.insert) {
                (Some(widget), None) => Binding::widget(widget),
                (None, Some(text)) => Binding::Insert(text.clone()),
                _ => {
                    return Err(ConfigError::BindingTarget {
                        keys: binding.keys.clone(),
                    });
                }
            };
            bindings.push((binding.keymap.as_str(), keys, target));
        }

        if let Some(mode) = &self.editing_mode {
            variables.set(variable_names::EDITING_MODE, mode.as_str());
        }
        for (option, value) in &self.options {
            options.set_to(*option, *value);
        }
        for (name, value) in &self.variables {
            variables.set(name, value.clone());
        }
        for (keymap, keys, target) in bindings {
            tracing::debug!(message = "config binding", keymap, keys = %crate::key_seq_to_string(&keys));
            keymaps.get_or_create(keymap).bind(&keys, target);
        }
        Ok(())
    }
}
