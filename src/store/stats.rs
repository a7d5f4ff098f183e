//! Store Statistics Module
//!
//! Tracks store activity: commands served, read hits and misses.

use serde::Serialize;

// == Store Stats ==
/// Tracks store activity counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of reads that found a value
    pub hits: u64,
    /// Number of reads on a missing key
    pub misses: u64,
    /// Number of commands executed, successful or not
    pub commands: u64,
    /// Current number of keys in the store
    pub total_keys: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_command(&mut self) {
        self.commands += 1;
    }

    pub fn set_total_keys(&mut self, count: usize) {
        self.total_keys = count;
    }
}
