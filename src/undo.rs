//! Undo/Redo history for the annotation store.
//!
//! History is a linear list of full-store checkpoints. Snapshots share their
//! shape values with the live store through `Arc`, and shapes are never
//! mutated in place, so a checkpoint stays valid after later edits.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::{AnnotationId, AnnotationObject};

/// Shape map as stored and snapshotted.
pub type AnnotationMap = BTreeMap<AnnotationId, Arc<AnnotationObject>>;

/// One checkpoint: the store contents plus the id counter at that time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub annotations: AnnotationMap,
    /// Value of the store's `last_index` when the checkpoint was taken.
    pub length: AnnotationId,
}

/// The undo/redo checkpoint list.
///
/// `index` always points at the checkpoint currently displayed. Saving after
/// an undo discards every checkpoint past `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: Vec<Snapshot>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// History holding a single empty checkpoint.
    pub fn new() -> Self {
        Self::with_initial(Snapshot::default())
    }

    /// History holding a single given checkpoint.
    pub fn with_initial(snapshot: Snapshot) -> Self {
        Self {
            snapshots: vec![snapshot],
            index: 0,
        }
    }

    /// Record a checkpoint after the current one, dropping any redo branch.
    pub fn save(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        self.index += 1;
        log::debug!(
            "📝 History: checkpoint {} ({} annotations)",
            self.index,
            self.snapshots[self.index].annotations.len()
        );
    }

    /// Step back one checkpoint. Returns the checkpoint to restore, if any.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        log::debug!("⏪ History: back to checkpoint {}", self.index);
        self.snapshots.get(self.index)
    }

    /// Step forward one checkpoint. Returns the checkpoint to restore, if any.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        log::debug!("⏩ History: forward to checkpoint {}", self.index);
        self.snapshots.get(self.index)
    }

    /// Collapse to a single checkpoint.
    pub fn reset(&mut self, snapshot: Snapshot) {
        self.snapshots = vec![snapshot];
        self.index = 0;
        log::debug!("🗑️ History cleared");
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Position of the displayed checkpoint.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position of the newest reachable checkpoint.
    pub fn last_index(&self) -> usize {
        self.snapshots.len() - 1
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.index]
    }
}
