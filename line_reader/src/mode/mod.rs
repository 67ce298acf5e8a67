// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editing mode state machine. One explicit current state, a transition table keyed
//! by (state, widget), and the keymap layers each state consults.

// Attach.
mod edit_mode;
mod transition_table;
mod vi_operator;

// Re-export.
pub use edit_mode::*;
pub use transition_table::*;
pub use vi_operator::*;
