use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Thread-safe visit counters keyed by base URL
///
/// Each call to [`VisitCounts::increment`] bumps the count exactly once and
/// returns the new value under the same lock, so concurrent callers never
/// lose or double-count a visit.
#[derive(Debug, Default)]
pub struct VisitCounts {
    counts: Mutex<HashMap<String, u32>>,
}

impl VisitCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `key` (starting from 1) and returns the new count
    pub fn increment(&self, key: &str) -> u32 {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        let count = counts.entry(key.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Returns the current count for `key` without changing it
    pub fn get(&self, key: &str) -> u32 {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys seen
    pub fn len(&self) -> usize {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
