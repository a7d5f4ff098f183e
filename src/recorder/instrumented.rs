//! Instrumented Cache
//!
//! A `Cache` whose `store` calls are counted and logged.

use std::ops::Deref;
use std::sync::Arc;

use crate::cache::{Cache, CacheKey, StoredValue};
use crate::error::Result;
use crate::recorder::{instrument, CallCounter, CallHistory, Operation};

impl Operation<(StoredValue,)> for Cache {
    type Output = CacheKey;

    fn call(&self, (value,): (StoredValue,)) -> Result<CacheKey> {
        self.store(value)
    }
}

// == Instrumented Cache ==
/// Drop-in handle for a `Cache` with a recorded `store`.
///
/// `store` goes through call counting and call history under the operation
/// name. Every other method derefs to the wrapped `Cache` and is not
/// recorded.
pub struct InstrumentedCache {
    cache: Arc<Cache>,
    recorded_store: CallCounter<CallHistory<Arc<Cache>>>,
}

impl InstrumentedCache {
    // == Constructor ==
    /// Instruments `cache.store` under `name`.
    ///
    /// The counter and logs go to the same store the cache writes values to.
    ///
    /// # Arguments
    /// * `cache` - The cache to wrap
    /// * `name` - Operation identity, e.g. `Cache.store`
    pub fn new(cache: Arc<Cache>, name: &str) -> Self {
        let store = cache.store_handle().clone();
        Self {
            recorded_store: instrument(cache.clone(), name, store),
            cache,
        }
    }

    /// Identity under which `store` calls are recorded.
    pub fn name(&self) -> &str {
        self.recorded_store.name()
    }

    // == Store ==
    /// Stores `value` under a freshly generated key, recording the call.
    pub fn store(&self, value: impl Into<StoredValue>) -> Result<CacheKey> {
        self.recorded_store.call((value.into(),))
    }
}

impl Deref for InstrumentedCache {
    type Target = Cache;

    fn deref(&self) -> &Cache {
        &self.cache
    }
}
