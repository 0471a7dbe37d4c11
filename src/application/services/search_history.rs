//! Recently viewed search results.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// Names of the most recently opened search results, oldest first.
#[derive(Debug)]
pub struct SearchHistory {
    entries: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl SearchHistory {
    /// Number of entries kept by default.
    pub const DEFAULT_CAPACITY: usize = 3;

    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
        }
    }

    /// Appends `name`, dropping the oldest entry once over capacity.
    pub fn record(&self, name: impl Into<String>) {
        let mut entries = self.entries.lock();
        entries.push_back(name.into());
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
