//! # Undo/Redo Stack
//!
//! Snapshot history for the editor.
//!
//! ## Design
//!
//! - Each undoable edit records the state from *before* it was applied
//! - Undo pushes the current state onto redo and hands back the snapshot
//! - Redo is the mirror image
//! - New edits clear the redo stack
//! - A pending batch lets rapid edits of one kind on one target share an
//!   entry until its deadline passes
//!
//! ```text
//! record(A) ──► pending {kind, target, expires_at = now + window}
//! record(A) before expires_at ──► coalesced, expires_at slides forward
//! record(B) / close_batch / undo / redo ──► pending cleared
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pagecraft_editor::UndoStack;
//! use std::time::Instant;
//!
//! let mut stack: UndoStack<u32> = UndoStack::new();
//! stack.record("EDIT", 1, None, Instant::now());
//!
//! assert_eq!(stack.undo(2), Some(1));
//! assert_eq!(stack.redo(1), Some(2));
//! ```

use crate::actions::BatchKey;
use crate::config::{DEFAULT_BATCH_WINDOW_MS, DEFAULT_HISTORY_LIMIT};
use std::time::{Duration, Instant};
use tracing::debug;

/// One undo (or redo) step
#[derive(Debug, Clone)]
pub struct HistoryEntry<S> {
    /// Name of the action that produced the step
    pub label: &'static str,

    /// State to restore
    pub snapshot: S,

    pub timestamp: Instant,
}

/// The open batch, if the last push was batchable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBatch {
    pub kind: &'static str,
    pub target_id: String,
    pub expires_at: Instant,
}

/// Result of [`UndoStack::record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// A new entry was pushed
    Pushed,
    /// The edit merged into the pending batch; the snapshot was discarded
    Coalesced,
}

/// Undo/redo stack over snapshots of type `S`
#[derive(Debug)]
pub struct UndoStack<S> {
    /// Most recent last
    undo_stack: Vec<HistoryEntry<S>>,

    /// Most recent last
    redo_stack: Vec<HistoryEntry<S>>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    batch_window: Duration,

    pending_batch: Option<PendingBatch>,
}

impl<S> UndoStack<S> {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            batch_window: Duration::from_millis(DEFAULT_BATCH_WINDOW_MS),
            pending_batch: None,
        }
    }

    pub fn with_batch_window(mut self, window: Duration) -> Self {
        self.batch_window = window;
        self
    }

    /// Whether an edit with `key` at `now` would merge into the pending batch
    pub fn coalesces(&self, key: Option<&BatchKey>, now: Instant) -> bool {
        match (&self.pending_batch, key) {
            (Some(pending), Some(key)) => {
                pending.kind == key.kind && pending.target_id == key.target_id && now < pending.expires_at
            }
            _ => false,
        }
    }

    /// Record an applied edit, given the state from before it
    pub fn record(&mut self, label: &'static str, before: S, key: Option<BatchKey>, now: Instant) -> Recorded {
        if self.coalesces(key.as_ref(), now) {
            if let Some(pending) = self.pending_batch.as_mut() {
                pending.expires_at = now + self.batch_window;
            }
            debug!(label, "Coalesced edit into pending batch");
            return Recorded::Coalesced;
        }

        self.push_entry(HistoryEntry {
            label,
            snapshot: before,
            timestamp: now,
        });

        self.pending_batch = key.map(|key| PendingBatch {
            kind: key.kind,
            target_id: key.target_id,
            expires_at: now + self.batch_window,
        });

        debug!(label, levels = self.undo_stack.len(), "Pushed history entry");
        Recorded::Pushed
    }

    /// End the pending batch so the next edit starts a fresh entry
    pub fn close_batch(&mut self) {
        self.pending_batch = None;
    }

    fn push_entry(&mut self, entry: HistoryEntry<S>) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back. `current` goes onto the redo stack; the restored state is returned.
    pub fn undo(&mut self, current: S) -> Option<S> {
        let entry = self.undo_stack.pop()?;
        self.pending_batch = None;

        self.redo_stack.push(HistoryEntry {
            label: entry.label,
            snapshot: current,
            timestamp: entry.timestamp,
        });

        Some(entry.snapshot)
    }

    /// Step forward again
    pub fn redo(&mut self, current: S) -> Option<S> {
        let entry = self.redo_stack.pop()?;
        self.pending_batch = None;

        self.undo_stack.push(HistoryEntry {
            label: entry.label,
            snapshot: current,
            timestamp: entry.timestamp,
        });

        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn pending_batch(&self) -> Option<&PendingBatch> {
        self.pending_batch.as_ref()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending_batch = None;
    }

    /// Label of the step `undo` would revert
    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|entry| entry.label)
    }

    pub fn redo_label(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|entry| entry.label)
    }
}

impl<S> Default for UndoStack<S> {
    fn default() -> Self {
        Self::new()
    }
}
