// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
mod decl_macros;
mod ring_buffer;

// Re-export.
pub use ring_buffer::*;
