//! This module keeps the execution history: an append-only, index-addressable
//! sequence of full machine snapshots. Seeking restores a live machine from any
//! recorded step without mutating the log itself.

use crate::types::{Direction, MachineError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable snapshot of the machine after a step (or at load time for step 0).
///
/// Each snapshot carries a full independent copy of the tape map rather than a
/// diff. That costs O(tape size) memory per step; a delta representation
/// reconstructed by replay would be the alternative for very large tapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Sparse tape cells at this step.
    pub cells: HashMap<i64, char>,
    /// Head position at this step.
    pub head: i64,
    /// Current state label at this step.
    pub state: String,
    /// Step counter value at this step.
    pub step: usize,
    /// The move that produced this snapshot, `None` for the initial entry.
    pub move_taken: Option<Direction>,
    /// The move the machine departed with, stamped when the following step runs.
    pub next_move: Option<Direction>,
}

impl Snapshot {
    /// Creates the snapshot for a freshly initialized machine (step 0, no move yet).
    pub fn initial(cells: HashMap<i64, char>, head: i64, state: String) -> Self {
        Self {
            cells,
            head,
            state,
            step: 0,
            move_taken: None,
            next_move: None,
        }
    }
}

/// Ordered, index-addressable log of snapshots.
///
/// Cleared and reseeded with the initial snapshot on every load or reset, then
/// growing monotonically until the next reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the log and seeds it with the snapshot of a freshly initialized
    /// machine at index 0.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push(initial);
    }

    /// Appends the post-step snapshot and stamps the previous entry with the
    /// direction just taken.
    pub fn record(&mut self, mut snapshot: Snapshot, direction: Direction) {
        snapshot.move_taken = Some(direction);
        if let Some(previous) = self.entries.last_mut() {
            previous.next_move = Some(direction);
        }
        self.entries.push(snapshot);
    }

    /// Returns the snapshot at the given index.
    ///
    /// A non-destructive, repeatable read: the log itself is never mutated by
    /// seeking.
    pub fn get(&self, index: usize) -> Result<&Snapshot, MachineError> {
        self.entries.get(index).ok_or(MachineError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Returns the number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most recent snapshot, if any.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// Returns the recorded snapshots in order.
    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    /// Rebuilds a history from recorded entries, for restore.
    pub fn from_entries(entries: Vec<Snapshot>) -> Self {
        Self { entries }
    }
}
