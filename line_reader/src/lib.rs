// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_line_reader
//!
//! A modal line editing engine for terminal programs (shells, REPLs, consoles). Given a
//! stream of key presses it maintains an editable buffer, renders prompts, and hands
//! back a finished line.
//!
//! The engine is a state machine built out of these parts:
//!
//! | Module          | Responsibility                                                     |
//! |-----------------|--------------------------------------------------------------------|
//! | [`buffer`]      | Text, cursor, mark, and region type                                |
//! | [`keymap`]      | Key notation, keymaps, ambiguous prefix resolution                 |
//! | [`mode`]        | Editing mode state machine (emacs, vi insert/command/opp, visual, menu) |
//! | [`widget`]      | Named widgets: built-in catalogue and user registry                |
//! | [`undo`]        | Undo/redo snapshots and the kill ring                              |
//! | [`argument`]    | Numeric argument (repeat count) accumulation                       |
//! | [`prompt`]      | `%` escape prompt templates with column width accounting           |
//! | [`options`]     | Option flags, variables, JSON config                               |
//! | [`collaborators`]| History, completer, parser, highlighter, expander traits          |
//! | [`reader`]      | [`LineReader`], the read loop, dispatch, and redisplay             |
//!
//! # Example
//!
//! ```no_run
//! use r3bl_line_reader::{LineReader, ReadlineEvent};
//!
//! let mut reader = LineReader::builder().build_for_terminal()?;
//! loop {
//!     match reader.read_line(Some("%N> "), None, None, None)? {
//!         ReadlineEvent::Line(line) => println!("got: {line}"),
//!         ReadlineEvent::Interrupted { .. } => continue,
//!         ReadlineEvent::Eof => break,
//!     }
//! }
//! # Ok::<(), r3bl_line_reader::ReadlineError>(())
//! ```

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod argument;
pub mod buffer;
pub mod collaborators;
pub mod core;
pub mod keymap;
pub mod mode;
pub mod options;
pub mod prompt;
pub mod reader;
pub mod undo;
pub mod widget;

// Re-export.
pub use argument::*;
pub use buffer::*;
pub use collaborators::*;
pub use crate::core::*;
pub use keymap::*;
pub use mode::*;
pub use options::*;
pub use prompt::*;
pub use reader::*;
pub use undo::*;
pub use widget::*;
