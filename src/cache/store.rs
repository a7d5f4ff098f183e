//! Cache Engine Module
//!
//! Main cache engine: random-key storage and typed retrieval over a
//! `KeyValueStore`.

use tracing::debug;

use crate::cache::{decode_float, decode_int, decode_utf8, CacheKey, StoredValue};
use crate::error::{DecodeError, Result};
use crate::store::SharedStore;

// == Cache ==
/// Key-value cache addressed by randomly generated keys.
pub struct Cache {
    store: SharedStore,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache over `store`, clearing every key it holds first.
    ///
    /// Each cache starts a fresh session: values and call history left by a
    /// previous instance are discarded.
    pub fn new(store: SharedStore) -> Result<Self> {
        store.clear_all()?;
        debug!("cache session started, store cleared");
        Ok(Self { store })
    }

    /// Returns the handle to the underlying store.
    pub fn store_handle(&self) -> &SharedStore {
        &self.store
    }

    // == Store ==
    /// Stores `value` under a freshly generated key and returns the key.
    pub fn store(&self, value: impl Into<StoredValue>) -> Result<CacheKey> {
        let value = value.into();
        let key = CacheKey::generate();
        self.store.set(key.as_str(), &value.to_bytes())?;
        debug!(key = %key, kind = ?value.kind(), "value stored");
        Ok(key)
    }

    // == Get ==
    /// Returns the raw bytes stored under `key`, or `None` if absent.
    pub fn get(&self, key: impl AsRef<str>) -> Result<Option<Vec<u8>>> {
        self.store.get(key.as_ref())
    }

    /// Returns the value under `key` converted by `decode`.
    ///
    /// `decode` only runs when the key exists; its failure is returned as
    /// `CacheError::Decode`.
    pub fn get_with<T, F>(&self, key: impl AsRef<str>, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> std::result::Result<T, DecodeError>,
    {
        match self.get(key)? {
            Some(raw) => Ok(Some(decode(raw)?)),
            None => Ok(None),
        }
    }

    /// Returns the value under `key` as UTF-8 text.
    pub fn get_str(&self, key: impl AsRef<str>) -> Result<Option<String>> {
        self.get_with(key, decode_utf8)
    }

    /// Returns the value under `key` parsed as a base-10 integer.
    pub fn get_int(&self, key: impl AsRef<str>) -> Result<Option<i64>> {
        self.get_with(key, decode_int)
    }

    /// Returns the value under `key` parsed as a float.
    pub fn get_float(&self, key: impl AsRef<str>) -> Result<Option<f64>> {
        self.get_with(key, decode_float)
    }
}
