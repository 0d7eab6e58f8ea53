//! Undo/redo history: a capped, linear stack of full-document snapshots.
//!
//! DESIGN
//! ======
//! Each entry is a complete copy of the element list at a discrete-edit
//! boundary (drag end, property commit, add/delete/group). There is no
//! operation log and no branching: pushing after an undo discards every redo
//! entry. The oldest entries are evicted once `capacity` is exceeded, so the
//! earliest reachable state may be later than the document's true initial
//! state.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::HISTORY_LIMIT;
use crate::element::Element;

/// One immutable point-in-time copy of the element list.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub elements: Vec<Element>,
    /// Wall-clock time the snapshot was taken, in milliseconds since the epoch.
    pub timestamp_ms: i64,
}

impl Snapshot {
    fn now(elements: Vec<Element>) -> Self {
        Self { elements, timestamp_ms: now_ms() }
    }
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Snapshot stack with a cursor pointing at the state currently shown.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Vec::new(), HISTORY_LIMIT)
    }
}

impl History {
    /// Start a history whose only entry is `initial`. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(initial: Vec<Element>, capacity: usize) -> Self {
        let mut entries = VecDeque::with_capacity(capacity.min(HISTORY_LIMIT) + 1);
        entries.push_back(Snapshot::now(initial));
        Self { entries, cursor: 0, capacity: capacity.max(1) }
    }

    /// Record a new snapshot after the cursor, discarding any redo entries and
    /// evicting the oldest entries beyond capacity.
    pub fn push(&mut self, elements: Vec<Element>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(Snapshot::now(elements));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry and return the elements to restore, or `None` at the earliest entry.
    pub fn undo(&mut self) -> Option<&[Element]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(|s| s.elements.as_slice())
    }

    /// Step forward one entry and return the elements to restore, or `None` at the latest entry.
    pub fn redo(&mut self) -> Option<&[Element]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).map(|s| s.elements.as_slice())
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of retained snapshots (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history holds at least its initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
