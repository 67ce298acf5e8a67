// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`LineReader`] and the machinery behind [`LineReader::read_line`]: the edit loop,
//! the dispatch pipeline around each widget, keys read by widgets directly, and
//! redisplay.

// Attach.
mod builder;
mod dispatch;
mod display;
mod edit_state;
mod error;
mod line_reader_struct;
mod minibuffer;
mod read_loop;

// Re-export.
pub use builder::*;
pub(crate) use display::*;
pub(crate) use edit_state::*;
pub use error::*;
pub use line_reader_struct::*;
pub(crate) use minibuffer::*;
