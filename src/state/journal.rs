//! Bounded message history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::message::Message;

/// One journaled message with the time it was recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    pub message: Message,
}

/// Capacity-bounded log of messages, oldest first.
///
/// Pushing past capacity evicts the oldest entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Journal {
    capacity: usize,
    entries: VecDeque<JournalEntry>,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl Journal {
    /// Entries kept when nothing else is configured.
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// An empty journal holding at most `capacity` entries. A capacity of
    /// zero records nothing.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Journal {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    /// Record a message stamped with the current time.
    pub fn push(&mut self, message: Message) {
        self.push_at(Utc::now(), message);
    }

    /// Record a message with an explicit timestamp.
    pub fn push_at(&mut self, timestamp: DateTime<Utc>, message: Message) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(JournalEntry { timestamp, message });
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &JournalEntry> + '_ {
        self.entries.iter()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&JournalEntry> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
