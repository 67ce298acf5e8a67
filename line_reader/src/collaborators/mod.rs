// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Capabilities the engine calls into but does not own: history, completion, line
//! parsing, highlighting, and history expansion. Each is a trait with a default
//! implementation, except the completer which has none.

// Attach.
mod completer;
mod expander;
mod highlighter;
mod history;
mod parser;

// Re-export.
pub use completer::*;
pub use expander::*;
pub use highlighter::*;
pub use history::*;
pub use parser::*;
