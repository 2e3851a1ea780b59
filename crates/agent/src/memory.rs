//! Bounded conversation memory
//!
//! Keeps the most recent exchanges of one conversation. Once the capacity
//! is exceeded the oldest entries are dropped.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use yoga_agent_core::{ContextFlags, Emotion};

/// One remembered user message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub message: String,
    pub context: ContextFlags,
    pub emotion: Emotion,
}

#[derive(Debug, Clone)]
pub struct ConversationMemory {
    entries: VecDeque<MemoryEntry>,
    capacity: usize,
}

impl ConversationMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append an entry, evicting from the front past capacity
    pub fn push(&mut self, entry: MemoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Oldest first
    pub fn entries(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&MemoryEntry> {
        self.entries.back()
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
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(5)
    }
}
