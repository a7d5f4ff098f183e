//! In-Memory Store Module
//!
//! A process-local `KeyValueStore` backed by a HashMap behind a mutex.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::trace;

use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, StoreStats};

// == Slot ==
/// What a single key holds.
#[derive(Debug, Clone)]
enum Slot {
    Bytes(Vec<u8>),
    List(Vec<Vec<u8>>),
}

impl Slot {
    fn kind(&self) -> &'static str {
        match self {
            Slot::Bytes(_) => "bytes",
            Slot::List(_) => "list",
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<String, Slot>,
    stats: StoreStats,
}

// == Memory Store ==
/// In-process mapping store.
///
/// Every method takes the lock once, so each single-key operation is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> Result<StoreStats> {
        let inner = self.lock()?;
        let mut stats = inner.stats.clone();
        stats.set_total_keys(inner.slots.len());
        Ok(stats)
    }

    // == Length ==
    /// Returns the number of keys currently held.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.slots.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| CacheError::storage("store lock poisoned"))
    }

    /// Takes the lock and counts one command.
    fn command(&self, name: &str, key: &str) -> Result<MutexGuard<'_, Inner>> {
        let mut inner = self.lock()?;
        inner.stats.record_command();
        trace!(command = name, key, "store command");
        Ok(inner)
    }
}

fn wrong_type(key: &str, found: &Slot, wanted: &str) -> CacheError {
    CacheError::storage(format!(
        "WRONGTYPE key '{}' holds {}, operation expects {}",
        key,
        found.kind(),
        wanted
    ))
}

/// Resolves inclusive, possibly negative bounds against `len`.
fn resolve_range(len: usize, start: i64, end: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let end = if end < 0 { end + len } else { end.min(len - 1) };
    if len == 0 || start > end || start >= len {
        return None;
    }
    Some((start as usize, end as usize))
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut inner = self.command("set", key)?;
        inner.slots.insert(key.to_string(), Slot::Bytes(value.to_vec()));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut inner = self.command("get", key)?;
        let found = match inner.slots.get(key) {
            Some(Slot::Bytes(bytes)) => Some(bytes.clone()),
            Some(other) => return Err(wrong_type(key, other, "bytes")),
            None => None,
        };
        if found.is_some() {
            inner.stats.record_hit();
        } else {
            inner.stats.record_miss();
        }
        Ok(found)
    }

    fn append_to_list(&self, key: &str, value: &str) -> Result<usize> {
        let mut inner = self.command("append_to_list", key)?;
        let slot = inner
            .slots
            .entry(key.to_string())
            .or_insert_with(|| Slot::List(Vec::new()));
        match slot {
            Slot::List(items) => {
                items.push(value.as_bytes().to_vec());
                Ok(items.len())
            }
            other => Err(wrong_type(key, other, "list")),
        }
    }

    fn range_of_list(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>> {
        let mut guard = self.command("range_of_list", key)?;
        let inner = &mut *guard;
        let items = match inner.slots.get(key) {
            Some(Slot::List(items)) => items,
            Some(other) => return Err(wrong_type(key, other, "list")),
            None => {
                inner.stats.record_miss();
                return Ok(Vec::new());
            }
        };
        let result = match resolve_range(items.len(), start, end) {
            Some((from, to)) => items[from..=to].to_vec(),
            None => Vec::new(),
        };
        inner.stats.record_hit();
        Ok(result)
    }

    fn increment(&self, key: &str) -> Result<i64> {
        let mut inner = self.command("increment", key)?;
        let current = match inner.slots.get(key) {
            Some(Slot::Bytes(bytes)) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|text| text.parse::<i64>().ok())
                .ok_or_else(|| {
                    CacheError::storage(format!("value at '{}' is not an integer", key))
                })?,
            Some(other) => return Err(wrong_type(key, other, "bytes")),
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::storage(format!("increment would overflow '{}'", key)))?;
        inner
            .slots
            .insert(key.to_string(), Slot::Bytes(next.to_string().into_bytes()));
        Ok(next)
    }

    fn clear_all(&self) -> Result<()> {
        let mut inner = self.command("clear_all", "*")?;
        inner.slots.clear();
        Ok(())
    }
}
