// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{MotionKind, ViOperator};

/// Every built-in widget, by the name used in key bindings and
/// [`crate::LineReader::call_widget`]. The names are kebab case versions of the
/// variants (`BackwardKillWord` is `backward-kill-word`); the built-in catalogue is
/// fixed so that existing binding configurations keep working.
///
/// ```rust
/// use std::str::FromStr;
/// use r3bl_line_reader::WidgetName;
///
/// assert_eq!(WidgetName::from_str("vi-change-to").unwrap(), WidgetName::ViChangeTo);
/// assert_eq!(WidgetName::Abort.to_string(), "abort");
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum WidgetName {
    CallbackInit,
    CallbackFinish,
    CallbackKeymap,
    AcceptLine,
    ArgumentBase,
    BackwardChar,
    BackwardDeleteChar,
    BackwardDeleteWord,
    BackwardKillLine,
    BackwardKillWord,
    BackwardWord,
    Beep,
    BeginningOfBufferOrHistory,
    BeginningOfHistory,
    BeginningOfLine,
    BeginningOfLineHist,
    CapitalizeWord,
    CharacterSearch,
    CharacterSearchBackward,
    ClearScreen,
    CompletePrefix,
    CompleteWord,
    CopyPrevWord,
    CopyRegionAsKill,
    DeleteChar,
    DeleteCharOrList,
    DeleteWord,
    DigitArgument,
    DoLowercaseVersion,
    DownCaseWord,
    DownHistory,
    DownLine,
    DownLineOrHistory,
    DownLineOrSearch,
    EmacsBackwardWord,
    EmacsEditingMode,
    EmacsForwardWord,
    EndOfBufferOrHistory,
    EndOfHistory,
    EndOfLine,
    EndOfLineHist,
    ExchangePointAndMark,
    ExecuteNamedCmd,
    ExpandHistory,
    ExpandOrComplete,
    ExpandOrCompletePrefix,
    ExpandWord,
    ForwardChar,
    ForwardWord,
    HistoryBeginningSearchBackward,
    HistoryBeginningSearchForward,
    HistoryIncrementalPatternSearchBackward,
    HistoryIncrementalPatternSearchForward,
    HistoryIncrementalSearchBackward,
    HistoryIncrementalSearchForward,
    HistorySearchBackward,
    HistorySearchForward,
    InsertCloseCurly,
    InsertCloseParen,
    InsertCloseSquare,
    InferNextHistory,
    InsertComment,
    InsertLastWord,
    KillBuffer,
    KillLine,
    KillRegion,
    KillWholeLine,
    KillWord,
    ListChoices,
    ListExpand,
    MagicSpace,
    MenuExpandOrComplete,
    MenuComplete,
    MenuSelect,
    NegArgument,
    OverwriteMode,
    PutReplaceSelection,
    QuotedInsert,
    ReadCommand,
    RecursiveEdit,
    Redisplay,
    RedrawLine,
    Redo,
    ReverseMenuComplete,
    SelfInsert,
    SelfInsertUnmeta,
    Abort,
    SetLocalHistory,
    SetMarkCommand,
    SpellWord,
    SplitUndo,
    TransposeChars,
    TransposeWords,
    UndefinedKey,
    Undo,
    UniversalArgument,
    UpCaseWord,
    UpHistory,
    UpLine,
    UpLineOrHistory,
    UpLineOrSearch,
    ViAddEol,
    ViAddNext,
    ViBackwardBlankWord,
    ViBackwardBlankWordEnd,
    ViBackwardChar,
    ViBackwardDeleteChar,
    ViBackwardKillWord,
    ViBackwardWord,
    ViBackwardWordEnd,
    ViBeginningOfLine,
    ViChangeTo,
    ViChangeEol,
    ViChangeWholeLine,
    ViCmdMode,
    ViDelete,
    ViDeleteChar,
    ViDigitOrBeginningOfLine,
    ViDownLineOrHistory,
    ViEndOfLine,
    ViFetchHistory,
    ViFindNextChar,
    ViFindNextCharSkip,
    ViFindPrevChar,
    ViFindPrevCharSkip,
    ViFirstNonBlank,
    ViForwardBlankWord,
    ViForwardBlankWordEnd,
    ViForwardChar,
    ViForwardWord,
    ViForwardWordEnd,
    ViGotoColumn,
    ViHistorySearchBackward,
    ViHistorySearchForward,
    ViInsert,
    ViInsertBol,
    ViInsertComment,
    ViJoin,
    ViKillEol,
    ViKillLine,
    ViMatchBracket,
    ViOpenLineAbove,
    ViOpenLineBelow,
    ViOperSwapCase,
    ViPutAfter,
    ViPutBefore,
    ViQuotedInsert,
    ViRepeatChange,
    ViRepeatFind,
    ViRepeatSearch,
    ViReplace,
    ViReplaceChars,
    ViRevRepeatFind,
    ViRevRepeatSearch,
    ViSetBuffer,
    ViSubstitute,
    ViSwapCase,
    ViUndoChange,
    ViUpLineOrHistory,
    ViYank,
    ViYankEol,
    ViYankWholeLine,
    VisualLineMode,
    VisualMode,
    WhatCursorPosition,
    Yank,
    YankPop,
    Mouse,
}

impl WidgetName {
    #[must_use]
    pub fn name(self) -> &'static str { self.into() }

    /// Hooks that run around [`crate::LineReader::read_line`] rather than in response
    /// to keys.
    #[must_use]
    pub fn is_callback(self) -> bool {
        matches!(
            self,
            WidgetName::CallbackInit | WidgetName::CallbackFinish | WidgetName::CallbackKeymap
        )
    }

    /// Widgets whose removed text goes to the kill ring. Consecutive kills append to
    /// the same kill ring entry.
    #[must_use]
    pub fn is_kill(self) -> bool {
        matches!(
            self,
            WidgetName::KillLine
                | WidgetName::KillWord
                | WidgetName::KillWholeLine
                | WidgetName::KillRegion
                | WidgetName::KillBuffer
                | WidgetName::CopyRegionAsKill
                | WidgetName::BackwardKillWord
                | WidgetName::BackwardKillLine
                | WidgetName::ViBackwardKillWord
                | WidgetName::ViKillLine
                | WidgetName::ViKillEol
        )
    }

    #[must_use]
    pub fn is_yank(self) -> bool { matches!(self, WidgetName::Yank | WidgetName::YankPop) }

    /// Widgets that type text in. Consecutive runs of these share one undo frame.
    #[must_use]
    pub fn is_self_insert(self) -> bool {
        matches!(
            self,
            WidgetName::SelfInsert
                | WidgetName::SelfInsertUnmeta
                | WidgetName::InsertCloseCurly
                | WidgetName::InsertCloseParen
                | WidgetName::InsertCloseSquare
                | WidgetName::MagicSpace
        )
    }

    /// Widgets that ask the completer. A suffix left by one of these survives until the
    /// next widget that is neither a completion nor a typed char.
    #[must_use]
    pub fn is_completion(self) -> bool {
        matches!(
            self,
            WidgetName::CompleteWord
                | WidgetName::CompletePrefix
                | WidgetName::ExpandOrComplete
                | WidgetName::ExpandOrCompletePrefix
                | WidgetName::MenuComplete
                | WidgetName::MenuExpandOrComplete
                | WidgetName::MenuSelect
                | WidgetName::ReverseMenuComplete
                | WidgetName::ListChoices
                | WidgetName::DeleteCharOrList
        )
    }

    /// Widgets that manage undo themselves and so must not push an undo frame.
    #[must_use]
    pub fn skips_undo_recording(self) -> bool {
        matches!(
            self,
            WidgetName::Undo | WidgetName::Redo | WidgetName::ViUndoChange | WidgetName::SplitUndo
        )
    }

    /// Widgets that build up the numeric argument.
    #[must_use]
    pub fn is_argument(self) -> bool {
        matches!(
            self,
            WidgetName::DigitArgument
                | WidgetName::NegArgument
                | WidgetName::UniversalArgument
                | WidgetName::ArgumentBase
                | WidgetName::ViDigitOrBeginningOfLine
        )
    }

    /// The vi operator this widget starts, if it is one.
    #[must_use]
    pub fn vi_operator(self) -> Option<ViOperator> {
        Some(match self {
            WidgetName::ViDelete => ViOperator::Delete,
            WidgetName::ViChangeTo => ViOperator::Change,
            WidgetName::ViYank => ViOperator::Yank,
            WidgetName::ViOperSwapCase => ViOperator::SwapCase,
            _ => return None,
        })
    }

    /// How the span covered by this widget's cursor motion is taken when a vi operator
    /// is pending. `None` for widgets that are not motions.
    #[must_use]
    pub fn vi_motion_kind(self) -> Option<MotionKind> {
        Some(match self {
            WidgetName::ViForwardChar
            | WidgetName::ViBackwardChar
            | WidgetName::ForwardChar
            | WidgetName::BackwardChar
            | WidgetName::ViForwardWord
            | WidgetName::ViForwardBlankWord
            | WidgetName::ViBackwardWord
            | WidgetName::ViBackwardBlankWord
            | WidgetName::ForwardWord
            | WidgetName::BackwardWord
            | WidgetName::EmacsForwardWord
            | WidgetName::EmacsBackwardWord
            | WidgetName::ViBeginningOfLine
            | WidgetName::ViDigitOrBeginningOfLine
            | WidgetName::BeginningOfLine
            | WidgetName::EndOfLine
            | WidgetName::ViFirstNonBlank
            | WidgetName::ViFindPrevChar
            | WidgetName::ViFindPrevCharSkip
            | WidgetName::ViGotoColumn => MotionKind::Exclusive,
            WidgetName::ViForwardWordEnd
            | WidgetName::ViForwardBlankWordEnd
            | WidgetName::ViBackwardWordEnd
            | WidgetName::ViBackwardBlankWordEnd
            | WidgetName::ViEndOfLine
            | WidgetName::ViFindNextChar
            | WidgetName::ViFindNextCharSkip
            | WidgetName::ViMatchBracket => MotionKind::Inclusive,
            // The find that is repeated decides; see the vi find widgets.
            WidgetName::ViRepeatFind | WidgetName::ViRevRepeatFind => MotionKind::Exclusive,
            WidgetName::UpLine
            | WidgetName::DownLine
            | WidgetName::UpLineOrHistory
            | WidgetName::DownLineOrHistory
            | WidgetName::ViUpLineOrHistory
            | WidgetName::ViDownLineOrHistory => MotionKind::Linewise,
            _ => return None,
        })
    }
}
