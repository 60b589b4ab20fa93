//! Bounded transition history.
//!
//! History exists purely for diagnostics: each committed transition appends
//! one entry, and once [`HISTORY_CAPACITY`] entries are held the oldest is
//! evicted before the next is added.

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Maximum number of entries a machine retains.
pub const HISTORY_CAPACITY: usize = 50;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use flowstate::core::HistoryEntry;
/// use flowstate::workflows::{LoadEvent, LoadState};
///
/// let entry = HistoryEntry {
///     from: LoadState::Idle,
///     event: LoadEvent::Load,
///     to: LoadState::Loading,
///     timestamp: 1_700_000_000_000,
/// };
///
/// assert!(!entry.is_self_transition());
/// assert!(entry.recorded_at().is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HistoryEntry<S: State, E: Event> {
    /// The state being transitioned from
    pub from: S,
    /// The event that triggered the transition
    pub event: E,
    /// The state being transitioned to
    pub to: S,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl<S: State, E: Event> HistoryEntry<S, E> {
    /// Create an entry stamped with the current time.
    pub fn now(from: S, event: E, to: S) -> Self {
        Self {
            from,
            event,
            to,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// The timestamp as a UTC date-time, if it is in range.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }

    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

/// Insertion-ordered ring of the most recent transitions.
#[derive(Clone, Debug, Serialize)]
#[serde(bound = "")]
pub struct HistoryRing<S: State, E: Event> {
    entries: VecDeque<HistoryEntry<S, E>>,
    capacity: usize,
}

impl<S: State, E: Event> Default for HistoryRing<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> HistoryRing<S, E> {
    /// Create an empty ring holding at most [`HISTORY_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Create an empty ring with a custom bound (at least one entry).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest first when the ring is full.
    ///
    /// The length never exceeds the capacity, not even transiently.
    pub fn push(&mut self, entry: HistoryEntry<S, E>) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry<S, E>> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry<S, E>> {
        self.entries.back()
    }

    /// Copy of the retained entries, oldest first.
    pub fn snapshot(&self) -> Vec<HistoryEntry<S, E>> {
        self.entries.iter().cloned().collect()
    }

    /// States traversed: the `from` of the oldest retained entry, then the
    /// `to` of every entry.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.entries.len() + 1);
        if let Some(first) = self.entries.front() {
            path.push(&first.from);
        }
        for entry in &self.entries {
            path.push(&entry.to);
        }
        path
    }

    /// Time between the oldest and newest retained entries.
    ///
    /// Returns `None` when the ring is empty or the clock went backwards.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.front()?, self.entries.back()?);
        let millis = u64::try_from(last.timestamp - first.timestamp).ok()?;
        Some(Duration::from_millis(millis))
    }
}
