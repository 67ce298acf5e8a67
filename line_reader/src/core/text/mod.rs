// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
mod common_prefix;
mod display_width;
mod glob_pattern;
mod word_boundaries;

// Re-export.
pub use common_prefix::*;
pub use display_width::*;
pub use glob_pattern::*;
pub use word_boundaries::*;
