// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter, Result as FmtResult},
          str::FromStr};

use crate::WidgetName;

/// A widget named by a binding. Built-in names are checked at bind time; anything else
/// is a user widget that has to be registered before the key is pressed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WidgetRef {
    Builtin(WidgetName),
    Custom(String),
}

impl WidgetRef {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        WidgetName::from_str(name).map_or_else(|_| WidgetRef::Custom(name.to_string()), WidgetRef::Builtin)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            WidgetRef::Builtin(widget) => widget.name(),
            WidgetRef::Custom(name) => name,
        }
    }

    #[must_use]
    pub fn builtin(&self) -> Option<WidgetName> {
        match self {
            WidgetRef::Builtin(widget) => Some(*widget),
            WidgetRef::Custom(_) => None,
        }
    }
}

impl From<WidgetName> for WidgetRef {
    fn from(widget: WidgetName) -> Self { WidgetRef::Builtin(widget) }
}

impl Display for WidgetRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult { write!(f, "{}", self.name()) }
}

/// What a key sequence is bound to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    Widget(WidgetRef),
    /// Insert this text as if it had been typed.
    Insert(String),
    /// Explicitly unbound. In `main` this hides the binding of lower layers.
    Unbound,
}

impl Binding {
    #[must_use]
    pub fn widget(name: &str) -> Self { Binding::Widget(WidgetRef::from_name(name)) }

    #[must_use]
    pub fn builtin_widget(&self) -> Option<WidgetName> {
        match self {
            Binding::Widget(widget_ref) => widget_ref.builtin(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unbound(&self) -> bool { matches!(self, Binding::Unbound) }
}

impl From<WidgetName> for Binding {
    fn from(widget: WidgetName) -> Self { Binding::Widget(WidgetRef::Builtin(widget)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_widget_ref_from_name() {
        assert_eq!(WidgetRef::from_name("yank"), WidgetRef::Builtin(WidgetName::Yank));
        assert_eq!(
            WidgetRef::from_name("my-widget"),
            WidgetRef::Custom("my-widget".to_string())
        );
        assert_eq!(WidgetRef::from_name("my-widget").name(), "my-widget");
    }
}
