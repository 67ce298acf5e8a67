// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter, Result as FmtResult},
          sync::Arc};

use rustc_hash::FxHashMap;

use crate::{LineReader, WidgetResult};

/// A widget written by the embedding program. It gets the whole reader, so it can edit
/// the buffer, query state, and call other widgets by name.
pub type UserWidget = Arc<dyn Fn(&mut LineReader) -> WidgetResult + Send + Sync>;

/// User widgets by name. A user widget with a built-in's name shadows the built-in.
#[derive(Clone, Default)]
pub struct WidgetRegistry {
    widgets: FxHashMap<String, UserWidget>,
}

impl Debug for WidgetRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("WidgetRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl WidgetRegistry {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the widget that was registered under `name` before, if any.
    pub fn register(&mut self, name: &str, widget: UserWidget) -> Option<UserWidget> {
        tracing::debug!(message = "register widget", name);
        self.widgets.insert(name.to_string(), widget)
    }

    pub fn unregister(&mut self, name: &str) -> Option<UserWidget> { self.widgets.remove(name) }

    /// A handle to the widget. The registry stays borrowable while it runs.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<UserWidget> { self.widgets.get(name).cloned() }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool { self.widgets.contains_key(name) }

    /// Sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.widgets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize { self.widgets.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.widgets.is_empty() }
}
