// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Buffer snapshots for undo / redo, and the kill ring.

// Attach.
mod kill_ring;
mod undo_history;

// Re-export.
pub use kill_ring::*;
pub use undo_history::*;
