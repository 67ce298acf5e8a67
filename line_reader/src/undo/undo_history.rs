// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::{BufferSnapshot, RingBufferHeap};

pub const UNDO_HISTORY_CAPACITY: usize = 100;

/// When consecutive typed chars share one undo frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum UndoCoalescing {
    /// Every widget gets its own frame.
    Never,
    /// A run of self-inserts is undone as one.
    #[default]
    InsertRuns,
    /// Like [`UndoCoalescing::InsertRuns`], but typing a blank closes the frame, so
    /// each word is undone separately.
    Words,
}

/// Pre-mutation snapshots (oldest dropped once [`UNDO_HISTORY_CAPACITY`] is reached)
/// and the redo stack they feed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UndoHistory {
    undo: RingBufferHeap<BufferSnapshot, UNDO_HISTORY_CAPACITY>,
    redo: Vec<BufferSnapshot>,
    pub coalescing: UndoCoalescing,
    /// The newest frame belongs to a run of inserts that may still grow.
    insert_run_open: bool,
}

impl UndoHistory {
    #[must_use]
    pub fn new(coalescing: UndoCoalescing) -> Self {
        Self {
            coalescing,
            ..Default::default()
        }
    }

    /// Push the state from before a mutating widget. Anything that was undone can no
    /// longer be redone.
    pub fn record(&mut self, before: BufferSnapshot) {
        self.undo.add(before);
        self.redo.clear();
        self.insert_run_open = false;
    }

    /// Like [`Self::record`], for a self-insert of `inserted`. Joins the open insert
    /// run if the coalescing policy allows it.
    pub fn record_insert(&mut self, before: BufferSnapshot, inserted: Option<char>) {
        let joins = self.insert_run_open && self.coalescing != UndoCoalescing::Never;
        if !joins {
            self.record(before);
        }
        self.redo.clear();
        self.insert_run_open = match self.coalescing {
            UndoCoalescing::Never => false,
            UndoCoalescing::InsertRuns => true,
            UndoCoalescing::Words => !inserted.is_some_and(char::is_whitespace),
        };
    }

    /// Close the open insert run, so the next insert starts a new frame.
    pub fn split(&mut self) { self.insert_run_open = false; }

    /// Step back. `current` is kept for [`Self::redo`]. Returns the state to restore.
    pub fn undo(&mut self, current: BufferSnapshot) -> Option<BufferSnapshot> {
        let previous = self.undo.remove_head()?;
        self.redo.push(current);
        self.insert_run_open = false;
        Some(previous)
    }

    /// Step forward again after [`Self::undo`].
    pub fn redo(&mut self, current: BufferSnapshot) -> Option<BufferSnapshot> {
        let next = self.redo.pop()?;
        self.undo.add(current);
        self.insert_run_open = false;
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool { !self.undo.is_empty() }

    #[must_use]
    pub fn can_redo(&self) -> bool { !self.redo.is_empty() }

    #[must_use]
    pub fn len(&self) -> usize { self.undo.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.undo.is_empty() }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.insert_run_open = false;
    }
}
