// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fakes for the terminal: an output sink that records bytes and a key source that
//! replays a script.

// Attach.
mod scripted_key_source;
mod stdout_mock;

// Re-export.
pub use scripted_key_source::*;
pub use stdout_mock::*;
