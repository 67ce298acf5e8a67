// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The numeric argument: a repeat count typed before a widget.

// Attach.
mod numeric_argument;

// Re-export.
pub use numeric_argument::*;
