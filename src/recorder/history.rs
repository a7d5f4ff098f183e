//! Call History
//!
//! Appends the arguments and the result of every call of a wrapped
//! operation to two lists in the store.

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::recorder::{inputs_key, outputs_key, Operation};
use crate::repr::Repr;
use crate::store::SharedStore;

// == Call History ==
/// Logs each call's argument tuple to `name:inputs` before running the
/// wrapped operation, and its result to `name:outputs` after.
///
/// Nothing is rolled back: if the wrapped operation fails, its input stays
/// logged without a matching output.
pub struct CallHistory<O> {
    inner: O,
    name: String,
    inputs_key: String,
    outputs_key: String,
    store: SharedStore,
}

impl<O> CallHistory<O> {
    // == Constructor ==
    /// Creates a history recorder around `inner`.
    ///
    /// # Arguments
    /// * `inner` - The operation whose calls are logged
    /// * `name` - Prefix of the `name:inputs` and `name:outputs` logs
    /// * `store` - Store holding the logs
    pub fn new(inner: O, name: impl Into<String>, store: SharedStore) -> Self {
        let name = name.into();
        Self {
            inputs_key: inputs_key(&name),
            outputs_key: outputs_key(&name),
            inner,
            name,
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

impl<A, O> Operation<A> for CallHistory<O>
where
    A: Repr,
    O: Operation<A>,
    O::Output: fmt::Display,
{
    type Output = O::Output;

    // == Call ==
    fn call(&self, args: A) -> Result<Self::Output> {
        let input = args.repr();
        self.store.append_to_list(&self.inputs_key, &input)?;

        let output = self.inner.call(args)?;
        let rendered = output.to_string();
        self.store.append_to_list(&self.outputs_key, &rendered)?;

        debug!(operation = %self.name, input = %input, output = %rendered, "call recorded");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Cache, StoredValue};
    use crate::error::CacheError;
    use crate::store::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    struct Failing;

    impl Operation<(String,)> for Failing {
        type Output = String;

        fn call(&self, _args: (String,)) -> Result<String> {
            Err(CacheError::storage("boom"))
        }
    }

    fn list(store: &SharedStore, key: &str) -> Vec<String> {
        store
            .range_of_list(key, 0, -1)
            .unwrap()
            .into_iter()
            .map(|raw| String::from_utf8(raw).unwrap())
            .collect()
    }

    #[test]
    fn test_records_inputs_and_outputs() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone()).unwrap();
        let recorded = CallHistory::new(&cache, "Cache.store", store.clone());

        let k1 = recorded.call((StoredValue::from("first"),)).unwrap();
        let k2 = recorded.call((StoredValue::from(b"second"),)).unwrap();

        assert_eq!(
            list(&store, "Cache.store:inputs"),
            vec!["('first',)".to_string(), "(b'second',)".to_string()]
        );
        assert_eq!(
            list(&store, "Cache.store:outputs"),
            vec![k1.to_string(), k2.to_string()]
        );
    }

    #[test]
    fn test_rendered_inputs_per_kind() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone()).unwrap();
        let recorded = CallHistory::new(&cache, "Cache.store", store.clone());

        recorded.call((StoredValue::from(2.5),)).unwrap();
        recorded.call((StoredValue::from("it's"),)).unwrap();
        recorded.call((StoredValue::from(b"\x00\xff"),)).unwrap();
        recorded.call((StoredValue::from(-17),)).unwrap();
        recorded.call((StoredValue::from(1e16),)).unwrap();
        recorded.call((StoredValue::from("héllo"),)).unwrap();

        assert_eq!(
            list(&store, "Cache.store:inputs"),
            vec![
                "(2.5,)".to_string(),
                "(\"it's\",)".to_string(),
                "(b'\\x00\\xff',)".to_string(),
                "(-17,)".to_string(),
                "(1e+16,)".to_string(),
                "('héllo',)".to_string(),
            ]
        );
    }

    #[test]
    fn test_return_value_passes_through() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone()).unwrap();
        let recorded = CallHistory::new(&cache, "Cache.store", store.clone());

        let key = recorded.call((StoredValue::from(7),)).unwrap();
        assert_eq!(cache.get_int(&key).unwrap(), Some(7));
    }

    #[test]
    fn test_failed_call_keeps_input_without_output() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let recorded = CallHistory::new(Failing, "failing", store.clone());

        assert!(recorded.call(("x".to_string(),)).is_err());
        assert_eq!(list(&store, "failing:inputs"), vec!["('x',)".to_string()]);
        assert!(list(&store, "failing:outputs").is_empty());
    }

    #[test]
    fn test_does_not_touch_counter() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone()).unwrap();
        let recorded = CallHistory::new(&cache, "Cache.store", store.clone());

        recorded.call((StoredValue::from(1),)).unwrap();
        assert_eq!(store.get("Cache.store").unwrap(), None);
    }
}
