// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// A vi operator waiting for its motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViOperator {
    Delete,
    Change,
    Yank,
    SwapCase,
}

/// How the text between the start and end of a motion is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionKind {
    /// The char the motion lands on is not included (`w`, `b`, `h`).
    Exclusive,
    /// The char the motion lands on is included (`e`, `$`, `f`).
    Inclusive,
    /// Whole lines from start to end (`j`, `k`, and a doubled operator).
    Linewise,
}

/// Recorded when an operator widget runs in vi command mode, consumed by the motion
/// that follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingOperator {
    pub operator: ViOperator,
    /// Cursor position when the operator was typed.
    pub start: usize,
    /// Numeric argument given before the operator (`3` in `3dw`).
    pub count: i32,
    /// Register selected with `"x` before the operator.
    pub register: Option<char>,
}
