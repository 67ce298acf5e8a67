// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Widgets are the named editing actions that keys are bound to. The built-in
//! catalogue is [`WidgetName`]; programs add their own through [`WidgetRegistry`].

// Attach.
mod builtins;
mod registry;
mod widget_name;

// Re-export.
pub(crate) use builtins::{apply_operator, call_builtin};
pub use registry::*;
pub use widget_name::*;
