// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use miette::Diagnostic;
use thiserror::Error;

use crate::{ConfigError, KeySeqParseError};

/// Errors that end a [`crate::LineReader::read_line`] call, or that a setter reports.
/// Interrupts and end of input are not errors, see [`ReadlineEvent`].
#[derive(Debug, Error, Diagnostic)]
pub enum ReadlineError {
    #[error("terminal I/O failed")]
    #[diagnostic(code(line_reader::io))]
    Io(#[from] io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    KeySeq(#[from] KeySeqParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown keymap {0:?}")]
    #[diagnostic(
        code(line_reader::unknown_keymap),
        help("editing keymaps are emacs, viins, vicmd, viopp, visual, menu")
    )]
    UnknownKeymap(String),
}

/// How a [`crate::LineReader::read_line`] call ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadlineEvent {
    /// The user accepted a line.
    Line(String),
    /// The user hit the interrupt key. `partial_line` holds the abandoned buffer.
    Interrupted { partial_line: String },
    /// The input ended with an empty buffer (Ctrl-D, or the key source closed).
    Eof,
}

/// Unwinds the dispatch loop from inside a widget.
#[derive(Debug)]
pub enum Unwind {
    Interrupted,
    EndOfInput,
    Fatal(ReadlineError),
}

impl From<io::Error> for Unwind {
    fn from(error: io::Error) -> Self { Unwind::Fatal(ReadlineError::Io(error)) }
}

impl From<ReadlineError> for Unwind {
    fn from(error: ReadlineError) -> Self { Unwind::Fatal(error) }
}

/// What a widget returns. `Ok(false)` means it couldn't do its job (an edge of the
/// buffer, no history left, no candidates) and rings the bell.
pub type WidgetResult = Result<bool, Unwind>;
