// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Names of the built-in keymaps.

/// Global override layer, consulted before the mode's own keymap.
pub const MAIN: &str = "main";
pub const EMACS: &str = "emacs";
pub const VIINS: &str = "viins";
pub const VICMD: &str = "vicmd";
pub const VIOPP: &str = "viopp";
pub const VISUAL: &str = "visual";
pub const MENU: &str = "menu";
/// Last resort bindings for keys that must never be silently dropped.
pub const SAFE: &str = ".safe";

pub const ALL: [&str; 8] = [MAIN, EMACS, VIINS, VICMD, VIOPP, VISUAL, MENU, SAFE];
