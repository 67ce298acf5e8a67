// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key sequences, the keymaps that bind them, and the resolver that turns a live key
//! stream into bindings.
//!
//! A keymap is a trie keyed by [`crate::KeyPress`]. Looking up a sequence has four
//! outcomes ([`KeyLookup`]): an exact binding with nothing longer, an exact binding that
//! is also a prefix of longer ones (ambiguous, settled by the `ambiguous-binding`
//! timeout), a prefix only, or no match.

// Attach.
mod binding;
mod default_keymaps;
pub mod keymap_names;
mod keymap_struct;
mod key_seq;
mod resolver;

// Re-export.
pub use binding::*;
pub use default_keymaps::*;
pub use keymap_struct::*;
pub use key_seq::*;
pub use resolver::*;
