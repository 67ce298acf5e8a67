// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::motion;
use crate::{Key, LineReader, WidgetResult};

/// Add the digit of the key that ran this widget (`Alt-3`, or `3` in vi command mode).
/// Letters are digits too once `argument-base` raised the radix.
pub(super) fn digit_argument(reader: &mut LineReader) -> WidgetResult {
    let digit = match reader.state.keys.last().map(|key| key.key()) {
        Some(Key::Character(ch)) => ch.to_digit(36),
        _ => None,
    };
    match digit {
        Some(digit) => Ok(reader.state.argument.digit_argument(digit)),
        None => Ok(false),
    }
}

pub(super) fn neg_argument(reader: &mut LineReader) -> WidgetResult {
    reader.state.argument.neg_argument();
    Ok(true)
}

pub(super) fn universal_argument(reader: &mut LineReader) -> WidgetResult {
    reader.state.argument.universal_argument();
    Ok(true)
}

pub(super) fn argument_base(reader: &mut LineReader) -> WidgetResult {
    Ok(reader.state.argument.argument_base())
}

/// `0` continues a count that was started, and moves to the start of the line
/// otherwise.
pub(super) fn vi_digit_or_beginning_of_line(reader: &mut LineReader) -> WidgetResult {
    if reader.state.argument.is_active() {
        return digit_argument(reader);
    }
    motion::vi_beginning_of_line(reader)
}
