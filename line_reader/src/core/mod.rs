// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Building blocks shared by the rest of the crate: terminal I/O types, text helpers,
//! a bounded ring buffer, logging setup, and test fixtures.

// Attach sources.
pub mod common;
pub mod log;
pub mod terminal_io;
pub mod test_fixtures;
pub mod text;

// Re-export.
pub use common::*;
pub use log::*;
pub use terminal_io::*;
pub use test_fixtures::*;
pub use text::*;
