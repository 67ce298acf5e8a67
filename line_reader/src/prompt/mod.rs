// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Prompt templates with `%` escapes.
//!
//! | Escape         | Expands to                                                        |
//! |----------------|-------------------------------------------------------------------|
//! | `%%`           | `%`                                                               |
//! | `%N`           | Line number: `line-offset` plus the continuation line counter      |
//! | `%M`           | The "missing" hint of the last incomplete parse                    |
//! | `%Pc`          | Pad with `c` up to the width of the primary prompt                 |
//! | `%nPc`         | Pad with `c` up to column `n`                                      |
//! | `%{ ... %}`    | Zero width text (ANSI styling), escapes inside are expanded        |
//!
//! Anything else after a `%` is kept literally.

// Attach.
mod prompt_template;

// Re-export.
pub use prompt_template::*;
