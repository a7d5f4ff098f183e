//! Store Module
//!
//! The mapping-store collaborator the cache persists into, plus an
//! in-process implementation.

mod memory;
mod stats;

use std::sync::Arc;

use crate::error::Result;

pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Key Value Store ==
/// A mapping store with byte values, append-only lists and counters.
///
/// Each method is expected to be atomic for the single key it touches.
/// There is no multi-key transaction.
pub trait KeyValueStore: Send + Sync {
    /// Stores `value` under `key`, replacing whatever was there.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the bytes stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Appends `value` to the list at `key`, creating it if needed.
    /// Returns the new list length.
    fn append_to_list(&self, key: &str, value: &str) -> Result<usize>;

    /// Returns list elements between `start` and `end`, both inclusive.
    /// Negative indices count from the end of the list.
    fn range_of_list(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>>;

    /// Increments the integer counter at `key`, starting from 0 if absent.
    fn increment(&self, key: &str) -> Result<i64>;

    /// Discards every key.
    fn clear_all(&self) -> Result<()>;
}

/// Shared handle to a store, cloned into every component that needs one.
pub type SharedStore = Arc<dyn KeyValueStore>;
