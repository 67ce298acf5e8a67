// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editable text: chars, cursor, optional mark, overwrite flag. All positions are
//! char indices and every operation clamps instead of failing.

// Attach.
mod buffer_struct;
mod region;

// Re-export.
pub use buffer_struct::*;
pub use region::*;
