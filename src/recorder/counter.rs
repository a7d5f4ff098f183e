//! Call Counter
//!
//! Counts invocations of a wrapped operation in the store.

use tracing::debug;

use crate::error::Result;
use crate::recorder::Operation;
use crate::store::SharedStore;

// == Call Counter ==
/// Increments the counter at `name` once per call, before running the
/// wrapped operation. A failing call is still counted.
pub struct CallCounter<O> {
    inner: O,
    name: String,
    store: SharedStore,
}

impl<O> CallCounter<O> {
    // == Constructor ==
    /// Creates a counter around `inner`.
    ///
    /// # Arguments
    /// * `inner` - The operation whose calls are counted
    /// * `name` - Key of the counter in the store
    /// * `store` - Store holding the counter
    pub fn new(inner: O, name: impl Into<String>, store: SharedStore) -> Self {
        Self {
            inner,
            name: name.into(),
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<A, O: Operation<A>> Operation<A> for CallCounter<O> {
    type Output = O::Output;

    // == Call ==
    fn call(&self, args: A) -> Result<Self::Output> {
        let count = self.store.increment(&self.name)?;
        debug!(operation = %self.name, count, "call counted");
        self.inner.call(args)
    }
}
