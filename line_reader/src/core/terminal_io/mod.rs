// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key codes coming in and bytes going out. The engine only ever sees [`KeyPress`]
//! values pulled from an [`InputDevice`], and writes to an [`OutputDevice`].

// Attach.
mod crossterm_key_source;
mod input_device;
mod key_press;
mod key_source;
mod modifier_keys_mask;
mod output_device;
mod terminal_io_type_aliases;

// Re-export.
pub use crossterm_key_source::*;
pub use input_device::*;
pub use key_press::*;
pub use key_source::*;
pub use modifier_keys_mask::*;
pub use output_device::*;
pub use terminal_io_type_aliases::*;
