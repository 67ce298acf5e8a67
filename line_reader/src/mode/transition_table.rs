// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::{EditMode, WidgetName};

/// Unconditional mode changes that follow a successful widget. Transitions that depend
/// on more than the (mode, widget) pair, such as finishing an operator with a motion or
/// opening the completion menu, are made by the widgets themselves.
pub static MODE_TRANSITIONS: LazyLock<FxHashMap<(EditMode, WidgetName), EditMode>> =
    LazyLock::new(|| {
        use EditMode::{Emacs, ViCommand, ViInsert, ViOperatorPending, Visual};
        use WidgetName as W;

        let mut table = FxHashMap::default();

        for from in [Emacs, ViInsert, ViOperatorPending, Visual] {
            table.insert((from, W::ViCmdMode), ViCommand);
        }
        for from in [ViInsert, ViCommand, ViOperatorPending, Visual] {
            table.insert((from, W::EmacsEditingMode), Emacs);
        }

        for widget in [
            W::ViInsert,
            W::ViAddNext,
            W::ViAddEol,
            W::ViInsertBol,
            W::ViOpenLineAbove,
            W::ViOpenLineBelow,
            W::ViSubstitute,
            W::ViChangeEol,
            W::ViChangeWholeLine,
            W::ViReplace,
        ] {
            table.insert((ViCommand, widget), ViInsert);
        }

        table.insert((ViCommand, W::VisualMode), Visual);
        table.insert((ViCommand, W::VisualLineMode), Visual);

        // Operators typed in command mode wait for a motion.
        for widget in [W::ViDelete, W::ViChangeTo, W::ViYank, W::ViOperSwapCase] {
            table.insert((ViCommand, widget), ViOperatorPending);
        }

        // Doubled operators (`dd`, `cc`) and operators on a visual selection finish
        // right away.
        for from in [ViOperatorPending, Visual] {
            table.insert((from, W::ViDelete), ViCommand);
            table.insert((from, W::ViYank), ViCommand);
            table.insert((from, W::ViOperSwapCase), ViCommand);
            table.insert((from, W::ViChangeTo), ViInsert);
        }
        table.insert((Visual, W::PutReplaceSelection), ViCommand);
        table.insert((Visual, W::ViJoin), ViCommand);

        table
    });

/// The mode to switch to after `widget` succeeds in `mode`, if the table has one.
#[must_use]
pub fn next_mode(mode: EditMode, widget: WidgetName) -> Option<EditMode> {
    MODE_TRANSITIONS.get(&(mode, widget)).copied()
}
