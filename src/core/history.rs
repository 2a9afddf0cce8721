//! Transition journal.
//!
//! A bounded, in-memory record of the transitions a machine has committed.
//! Disabled (capacity zero) by default so that dispatch never allocates on
//! its own account.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use handover::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     sequence: 1,
///     from: "Locked",
///     to: "Unlocked",
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "Unlocked");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransitionRecord {
    /// Position of this transition among all transitions of the machine, from 1
    pub sequence: u64,
    /// Name of the state that was exited
    pub from: &'static str,
    /// Name of the state that was entered
    pub to: &'static str,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of committed transitions.
///
/// Keeps the `capacity` most recent records. Older records are evicted,
/// but [`total`](Self::total) keeps counting every transition.
///
/// # Example
///
/// ```rust
/// use handover::TransitionLog;
///
/// let mut log = TransitionLog::with_capacity(2);
/// log.record("A", "B");
/// log.record("B", "C");
/// log.record("C", "A");
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.total(), 3);
/// assert_eq!(log.path(), vec!["B", "C", "A"]);
/// ```
#[derive(Clone, Debug, Default, Serialize)]
pub struct TransitionLog {
    capacity: usize,
    total: u64,
    records: VecDeque<TransitionRecord>,
}

impl TransitionLog {
    /// Create a log that records nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Create a log keeping at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            total: 0,
            records: VecDeque::with_capacity(capacity),
        }
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if this log keeps no records at all.
    pub fn is_disabled(&self) -> bool {
        self.capacity == 0
    }

    /// Record a committed transition.
    ///
    /// The total count always advances; the record itself is only kept if
    /// the log has a non-zero capacity.
    pub fn record(&mut self, from: &'static str, to: &'static str) {
        self.total += 1;
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(TransitionRecord {
            sequence: self.total,
            from,
            to,
            timestamp: Utc::now(),
        });
    }

    /// Number of transitions ever recorded, including evicted ones.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of records currently kept.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records are kept.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Kept records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Names of the states traversed by the kept records.
    ///
    /// The `from` state of the oldest kept record, then the `to` state of
    /// each record in order.
    pub fn path(&self) -> Vec<&'static str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Elapsed time between the oldest and newest kept records.
    ///
    /// Returns `None` if no records are kept.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Drop all kept records. The total count is preserved.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
