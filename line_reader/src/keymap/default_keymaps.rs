// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::LazyLock;

use crate::{Binding, KeyMap, KeyMaps, WidgetName, keymap_names, parse_key_seq};

/// The stock keymaps, built once per process. Every reader starts from a clone.
pub static DEFAULT_KEYMAPS: LazyLock<KeyMaps> = LazyLock::new(build_default_keymaps);

/// A fresh copy of the stock keymaps.
#[must_use]
pub fn default_keymaps() -> KeyMaps { DEFAULT_KEYMAPS.clone() }

fn build_default_keymaps() -> KeyMaps {
    let mut keymaps = KeyMaps::new();
    // `main` starts empty; it is the override layer for user bindings.
    keymaps.insert(keymap_names::MAIN, KeyMap::new());
    keymaps.insert(keymap_names::EMACS, emacs());
    keymaps.insert(keymap_names::VIINS, viins());
    keymaps.insert(keymap_names::VICMD, vicmd());
    keymaps.insert(keymap_names::VIOPP, viopp());
    keymaps.insert(keymap_names::VISUAL, visual());
    keymaps.insert(keymap_names::MENU, menu());
    keymaps.insert(keymap_names::SAFE, safe());
    keymaps
}

fn bind_all(keymap: &mut KeyMap, table: &[(&str, WidgetName)]) {
    for (notation, widget) in table {
        match parse_key_seq(notation) {
            Ok(keys) => keymap.bind(&keys, Binding::from(*widget)),
            Err(err) => tracing::error!(message = "bad default binding", notation, %err),
        }
    }
}

const ARROWS: &[(&str, WidgetName)] = &[
    ("<Left>", WidgetName::BackwardChar),
    ("<Right>", WidgetName::ForwardChar),
    ("<Up>", WidgetName::UpLineOrHistory),
    ("<Down>", WidgetName::DownLineOrHistory),
    ("<Home>", WidgetName::BeginningOfLine),
    ("<End>", WidgetName::EndOfLine),
    ("<Del>", WidgetName::DeleteChar),
];

fn emacs() -> KeyMap {
    use WidgetName as W;

    let mut keymap = KeyMap::new();
    bind_all(&mut keymap, &[
        ("^@", W::SetMarkCommand),
        ("^A", W::BeginningOfLine),
        ("^B", W::BackwardChar),
        ("^D", W::DeleteCharOrList),
        ("^E", W::EndOfLine),
        ("^F", W::ForwardChar),
        ("^G", W::Abort),
        ("^H", W::BackwardDeleteChar),
        ("^I", W::CompleteWord),
        ("^J", W::AcceptLine),
        ("^M", W::AcceptLine),
        ("^K", W::KillLine),
        ("^L", W::ClearScreen),
        ("^N", W::DownLineOrHistory),
        ("^P", W::UpLineOrHistory),
        ("^R", W::HistoryIncrementalSearchBackward),
        ("^S", W::HistoryIncrementalSearchForward),
        ("^T", W::TransposeChars),
        ("^U", W::KillWholeLine),
        ("^V", W::QuotedInsert),
        ("^W", W::BackwardKillWord),
        ("^Y", W::Yank),
        ("^_", W::Undo),
        ("^?", W::BackwardDeleteChar),
        ("^X^B", W::ViMatchBracket),
        ("^X^F", W::ViFindNextChar),
        ("^X^J", W::ViJoin),
        ("^X^K", W::KillBuffer),
        ("^X^N", W::InferNextHistory),
        ("^X^O", W::OverwriteMode),
        ("^X^R", W::RedrawLine),
        ("^X^U", W::Undo),
        ("^X^V", W::ViCmdMode),
        ("^X^X", W::ExchangePointAndMark),
        ("^X*", W::ExpandWord),
        ("^X=", W::WhatCursorPosition),
        ("^XG", W::ListExpand),
        ("^Xg", W::ListExpand),
        ("^Xr", W::HistoryIncrementalSearchBackward),
        ("^Xs", W::HistoryIncrementalSearchForward),
        ("^Xu", W::Undo),
        ("^X^?", W::BackwardKillLine),
        ("\\e^D", W::ListChoices),
        ("\\e^G", W::Abort),
        ("\\e^H", W::BackwardKillWord),
        ("\\e^I", W::SelfInsertUnmeta),
        ("\\e^J", W::ViCmdMode),
        ("\\e^M", W::SelfInsertUnmeta),
        ("\\e^_", W::CopyPrevWord),
        ("\\e^?", W::BackwardKillWord),
        ("\\e ", W::ExpandHistory),
        ("\\e!", W::ExpandHistory),
        ("\\e\"", W::QuotedInsert),
        ("\\e$", W::SpellWord),
        ("\\e'", W::QuotedInsert),
        ("\\e-", W::NegArgument),
        ("\\e.", W::InsertLastWord),
        ("\\e<", W::BeginningOfHistory),
        ("\\e>", W::EndOfHistory),
        ("\\e?", W::WhatCursorPosition),
        ("\\e_", W::InsertLastWord),
        ("\\eb", W::BackwardWord),
        ("\\ec", W::CapitalizeWord),
        ("\\ed", W::KillWord),
        ("\\ef", W::ForwardWord),
        ("\\eg", W::ListExpand),
        ("\\eh", W::RecursiveEdit),
        ("\\el", W::DownCaseWord),
        ("\\en", W::HistorySearchForward),
        ("\\ep", W::HistorySearchBackward),
        ("\\es", W::SpellWord),
        ("\\et", W::TransposeWords),
        ("\\eu", W::UpCaseWord),
        ("\\ew", W::CopyRegionAsKill),
        ("\\ex", W::ExecuteNamedCmd),
        ("\\ey", W::YankPop),
        ("\\ez", W::ReadCommand),
        ("\\e|", W::ViGotoColumn),
        ("<Ins>", W::OverwriteMode),
        ("<C-Left>", W::BackwardWord),
        ("<C-Right>", W::ForwardWord),
        ("<BackTab>", W::ReverseMenuComplete),
    ]);
    bind_all(&mut keymap, ARROWS);

    let digits: Vec<String> = ('0'..='9').map(|ch| format!("\\e{ch}")).collect();
    let uppercase: Vec<String> = ('A'..='Z').map(|ch| format!("\\e{ch}")).collect();
    let generated: Vec<(&str, WidgetName)> = digits
        .iter()
        .map(|it| (it.as_str(), W::DigitArgument))
        .chain(uppercase.iter().map(|it| (it.as_str(), W::DoLowercaseVersion)))
        .collect();
    bind_all(&mut keymap, &generated);

    keymap.unicode = Some(W::SelfInsert.into());
    keymap
}

fn viins() -> KeyMap {
    use WidgetName as W;

    let mut keymap = KeyMap::new();
    bind_all(&mut keymap, &[
        ("^D", W::DeleteCharOrList),
        ("^H", W::BackwardDeleteChar),
        ("^I", W::ExpandOrComplete),
        ("^J", W::AcceptLine),
        ("^M", W::AcceptLine),
        ("^L", W::ClearScreen),
        ("^N", W::MenuComplete),
        ("^P", W::ReverseMenuComplete),
        ("^R", W::HistoryIncrementalSearchBackward),
        ("^S", W::HistoryIncrementalSearchForward),
        ("^U", W::ViKillLine),
        ("^V", W::ViQuotedInsert),
        ("^W", W::ViBackwardKillWord),
        ("^?", W::BackwardDeleteChar),
        ("^[", W::ViCmdMode),
    ]);
    bind_all(&mut keymap, ARROWS);
    keymap.unicode = Some(W::SelfInsert.into());
    keymap
}

fn vicmd() -> KeyMap {
    use WidgetName as W;

    let mut keymap = KeyMap::new();
    bind_all(&mut keymap, &[
        ("^D", W::ListChoices),
        ("^G", W::WhatCursorPosition),
        ("^H", W::ViBackwardChar),
        ("^J", W::AcceptLine),
        ("^M", W::AcceptLine),
        ("^L", W::ClearScreen),
        ("^N", W::DownHistory),
        ("^P", W::UpHistory),
        ("^R", W::Redo),
        ("^?", W::ViBackwardChar),
        ("<Space>", W::ViForwardChar),
        ("\"", W::ViSetBuffer),
        ("#", W::ViInsertComment),
        ("$", W::ViEndOfLine),
        ("%", W::ViMatchBracket),
        (",", W::ViRevRepeatFind),
        ("-", W::ViUpLineOrHistory),
        ("+", W::ViDownLineOrHistory),
        (".", W::ViRepeatChange),
        ("/", W::ViHistorySearchBackward),
        ("0", W::ViDigitOrBeginningOfLine),
        (";", W::ViRepeatFind),
        ("?", W::ViHistorySearchForward),
        ("\\^", W::ViFirstNonBlank),
        ("|", W::ViGotoColumn),
        ("~", W::ViSwapCase),
        ("A", W::ViAddEol),
        ("B", W::ViBackwardBlankWord),
        ("C", W::ViChangeEol),
        ("D", W::ViKillEol),
        ("E", W::ViForwardBlankWordEnd),
        ("F", W::ViFindPrevChar),
        ("G", W::ViFetchHistory),
        ("I", W::ViInsertBol),
        ("J", W::ViJoin),
        ("N", W::ViRevRepeatSearch),
        ("O", W::ViOpenLineAbove),
        ("P", W::ViPutBefore),
        ("R", W::ViReplace),
        ("S", W::ViChangeWholeLine),
        ("T", W::ViFindPrevCharSkip),
        ("U", W::Redo),
        ("V", W::VisualLineMode),
        ("W", W::ViForwardBlankWord),
        ("X", W::ViBackwardDeleteChar),
        ("Y", W::ViYankWholeLine),
        ("a", W::ViAddNext),
        ("b", W::ViBackwardWord),
        ("c", W::ViChangeTo),
        ("d", W::ViDelete),
        ("e", W::ViForwardWordEnd),
        ("f", W::ViFindNextChar),
        ("g~", W::ViOperSwapCase),
        ("ge", W::ViBackwardWordEnd),
        ("gE", W::ViBackwardBlankWordEnd),
        ("gg", W::BeginningOfBufferOrHistory),
        ("h", W::ViBackwardChar),
        ("i", W::ViInsert),
        ("j", W::DownLineOrHistory),
        ("k", W::UpLineOrHistory),
        ("l", W::ViForwardChar),
        ("n", W::ViRepeatSearch),
        ("o", W::ViOpenLineBelow),
        ("p", W::ViPutAfter),
        ("r", W::ViReplaceChars),
        ("s", W::ViSubstitute),
        ("t", W::ViFindNextCharSkip),
        ("u", W::Undo),
        ("v", W::VisualMode),
        ("w", W::ViForwardWord),
        ("x", W::ViDeleteChar),
        ("y", W::ViYank),
        ("<Left>", W::ViBackwardChar),
        ("<Right>", W::ViForwardChar),
        ("<Up>", W::UpLineOrHistory),
        ("<Down>", W::DownLineOrHistory),
        ("<Home>", W::ViBeginningOfLine),
        ("<End>", W::ViEndOfLine),
        ("<Del>", W::ViDeleteChar),
    ]);
    let digits: Vec<String> = ('1'..='9').map(String::from).collect();
    let generated: Vec<(&str, WidgetName)> = digits
        .iter()
        .map(|it| (it.as_str(), W::DigitArgument))
        .collect();
    bind_all(&mut keymap, &generated);
    keymap
}

/// Consulted before `vicmd` while an operator waits for its motion.
fn viopp() -> KeyMap {
    let mut keymap = KeyMap::new();
    bind_all(&mut keymap, &[("^[", WidgetName::ViCmdMode)]);
    keymap
}

/// Consulted before `vicmd` while a selection is active.
fn visual() -> KeyMap {
    use WidgetName as W;

    let mut keymap = KeyMap::new();
    bind_all(&mut keymap, &[
        ("^[", W::ViCmdMode),
        ("c", W::ViChangeTo),
        ("d", W::ViDelete),
        ("J", W::ViJoin),
        ("o", W::ExchangePointAndMark),
        ("p", W::PutReplaceSelection),
        ("s", W::ViChangeTo),
        ("v", W::VisualMode),
        ("V", W::VisualLineMode),
        ("x", W::ViDelete),
        ("y", W::ViYank),
        ("~", W::ViOperSwapCase),
    ]);
    keymap
}

fn menu() -> KeyMap {
    use WidgetName as W;

    let mut keymap = KeyMap::new();
    bind_all(&mut keymap, &[
        ("^I", W::MenuComplete),
        ("<BackTab>", W::ReverseMenuComplete),
        ("^M", W::AcceptLine),
        ("^J", W::AcceptLine),
        ("<Down>", W::MenuComplete),
        ("<Right>", W::MenuComplete),
        ("<Up>", W::ReverseMenuComplete),
        ("<Left>", W::ReverseMenuComplete),
    ]);
    keymap
}

fn safe() -> KeyMap {
    use WidgetName as W;

    let mut keymap = KeyMap::new();
    bind_all(&mut keymap, &[
        ("^C", W::Abort),
        ("^D", W::DeleteCharOrList),
        ("^J", W::AcceptLine),
        ("^M", W::AcceptLine),
    ]);
    keymap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyLookup;
    use pretty_assertions::assert_eq;

    fn lookup(keymaps: &KeyMaps, name: &str, notation: &str) -> Option<WidgetName> {
        let keys = parse_key_seq(notation).unwrap();
        keymaps
            .get(name)
            .and_then(|keymap| keymap.bound(&keys))
            .and_then(Binding::builtin_widget)
    }

    #[test]
    fn test_all_keymaps_exist_and_main_is_empty() {
        let keymaps = default_keymaps();
        for name in keymap_names::ALL {
            assert!(keymaps.contains(name), "{name}");
        }
        assert!(keymaps.get(keymap_names::MAIN).unwrap().is_empty());
    }

    #[test]
    fn test_sample_bindings() {
        let keymaps = default_keymaps();
        assert_eq!(lookup(&keymaps, keymap_names::EMACS, "^A"), Some(WidgetName::BeginningOfLine));
        assert_eq!(lookup(&keymaps, keymap_names::EMACS, "\\e3"), Some(WidgetName::DigitArgument));
        assert_eq!(lookup(&keymaps, keymap_names::EMACS, "\\eF"), Some(WidgetName::DoLowercaseVersion));
        assert_eq!(lookup(&keymaps, keymap_names::EMACS, "^X^U"), Some(WidgetName::Undo));
        assert_eq!(lookup(&keymaps, keymap_names::VIINS, "^["), Some(WidgetName::ViCmdMode));
        assert_eq!(lookup(&keymaps, keymap_names::VICMD, "gE"), Some(WidgetName::ViBackwardBlankWordEnd));
        assert_eq!(lookup(&keymaps, keymap_names::VICMD, "\\^"), Some(WidgetName::ViFirstNonBlank));
        assert_eq!(lookup(&keymaps, keymap_names::SAFE, "^C"), Some(WidgetName::Abort));
    }

    #[test]
    fn test_vicmd_g_is_a_prefix() {
        let keymaps = default_keymaps();
        let vicmd = keymaps.get(keymap_names::VICMD).unwrap();
        assert_eq!(vicmd.lookup(&parse_key_seq("g").unwrap()), KeyLookup::Prefix);
    }

    #[test]
    fn test_every_default_binding_names_a_builtin() {
        let keymaps = default_keymaps();
        for name in keymaps.names() {
            for (keys, binding) in keymaps.get(name).unwrap().bindings() {
                assert!(binding.builtin_widget().is_some(), "{name} {keys:?}");
            }
        }
    }
}
