// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Option flags, variables, and the JSON config that sets them.

// Attach.
mod config;
mod reader_option;
mod variables;

// Re-export.
pub use config::*;
pub use reader_option::*;
pub use variables::*;
