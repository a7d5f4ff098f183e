//! Replay Reporter
//!
//! Reads back what the recorders wrote for an operation and renders it as a
//! call-by-call trace.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::cache::{decode_int, decode_utf8};
use crate::error::{CacheError, Result};
use crate::recorder::{inputs_key, outputs_key};
use crate::store::SharedStore;

// == Recorded Call ==
/// One recorded call: its rendered argument tuple and rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedCall {
    pub input: String,
    pub output: String,
}

// == Replay ==
/// Recorded history of one operation.
///
/// Inputs and outputs are paired by position. When the logs differ in
/// length, only the common prefix is paired and the leftover counts are kept
/// in `unmatched_inputs` / `unmatched_outputs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    pub name: String,
    /// Value of the call counter, 0 when the operation was never counted
    pub count: i64,
    pub calls: Vec<RecordedCall>,
    pub unmatched_inputs: usize,
    pub unmatched_outputs: usize,
}

impl Replay {
    /// True when every logged input has exactly one logged output.
    pub fn is_consistent(&self) -> bool {
        self.unmatched_inputs == 0 && self.unmatched_outputs == 0
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.name, self.count)?;
        for call in &self.calls {
            write!(f, "\n{}({}) -> {}", self.name, call.input, call.output)?;
        }
        if self.unmatched_inputs > 0 {
            write!(
                f,
                "\n{} has {} call(s) without a recorded output",
                self.name, self.unmatched_inputs
            )?;
        }
        if self.unmatched_outputs > 0 {
            write!(
                f,
                "\n{} has {} output(s) without a recorded call",
                self.name, self.unmatched_outputs
            )?;
        }
        Ok(())
    }
}

// == Replay Reporter ==
/// Reads call counters and call histories from a store.
#[derive(Clone)]
pub struct ReplayReporter {
    store: SharedStore,
}

impl ReplayReporter {
    // == Constructor ==
    /// Creates a reporter reading from `store`.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    // == Replay ==
    /// Loads the recorded history of `name`.
    ///
    /// # Arguments
    /// * `name` - Operation identity the recorders were created with
    pub fn replay(&self, name: &str) -> Result<Replay> {
        let count = match self.store.get(name)? {
            Some(raw) => decode_int(raw)?,
            None => 0,
        };
        let inputs = self.read_log(&inputs_key(name))?;
        let outputs = self.read_log(&outputs_key(name))?;

        let unmatched_inputs = inputs.len().saturating_sub(outputs.len());
        let unmatched_outputs = outputs.len().saturating_sub(inputs.len());
        if unmatched_inputs > 0 || unmatched_outputs > 0 {
            warn!(
                operation = name,
                inputs = inputs.len(),
                outputs = outputs.len(),
                "call history out of alignment, reporting common prefix only"
            );
        }

        let calls = inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| RecordedCall { input, output })
            .collect();

        Ok(Replay {
            name: name.to_string(),
            count,
            calls,
            unmatched_inputs,
            unmatched_outputs,
        })
    }

    // == Report ==
    /// Renders the recorded history of `name` as text.
    pub fn report(&self, name: &str) -> Result<String> {
        Ok(self.replay(name)?.to_string())
    }

    fn read_log(&self, key: &str) -> Result<Vec<String>> {
        self.store
            .range_of_list(key, 0, -1)?
            .into_iter()
            .map(|raw| decode_utf8(raw).map_err(CacheError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Cache, StoredValue};
    use crate::error::DecodeError;
    use crate::recorder::{instrument, Operation};
    use crate::store::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn setup() -> (SharedStore, Cache) {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone()).unwrap();
        (store, cache)
    }

    #[test]
    fn test_replay_renders_calls_in_order() {
        let (store, cache) = setup();
        let recorded = instrument(&cache, "store", store.clone());

        let k1 = recorded.call((StoredValue::from(b"first"),)).unwrap();
        let k2 = recorded.call((StoredValue::from(b"second"),)).unwrap();

        let report = ReplayReporter::new(store).report("store").unwrap();
        let expected = format!(
            "store was called 2 times:\nstore((b'first',)) -> {}\nstore((b'second',)) -> {}",
            k1, k2
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_replay_of_unknown_operation() {
        let (store, _cache) = setup();
        let replay = ReplayReporter::new(store).replay("never_called").unwrap();

        assert_eq!(replay.count, 0);
        assert!(replay.calls.is_empty());
        assert!(replay.is_consistent());
        assert_eq!(replay.to_string(), "never_called was called 0 times:");
    }

    #[test]
    fn test_replay_reports_missing_outputs() {
        let (store, _cache) = setup();
        store.increment("op").unwrap();
        store.increment("op").unwrap();
        store.append_to_list("op:inputs", "('a',)").unwrap();
        store.append_to_list("op:inputs", "('b',)").unwrap();
        store.append_to_list("op:outputs", "A").unwrap();

        let replay = ReplayReporter::new(store).replay("op").unwrap();
        assert_eq!(replay.count, 2);
        assert_eq!(
            replay.calls,
            vec![RecordedCall {
                input: "('a',)".to_string(),
                output: "A".to_string()
            }]
        );
        assert_eq!(replay.unmatched_inputs, 1);
        assert!(!replay.is_consistent());

        let text = replay.to_string();
        assert!(text.contains("op(('a',)) -> A"));
        assert!(text.contains("op has 1 call(s) without a recorded output"));
    }

    #[test]
    fn test_replay_reports_extra_outputs() {
        let (store, _cache) = setup();
        store.append_to_list("op:outputs", "orphan").unwrap();

        let replay = ReplayReporter::new(store).replay("op").unwrap();
        assert!(replay.calls.is_empty());
        assert_eq!(replay.unmatched_outputs, 1);
        assert!(replay
            .to_string()
            .contains("op has 1 output(s) without a recorded call"));
    }

    #[test]
    fn test_corrupt_counter_is_decode_error() {
        let (store, _cache) = setup();
        store.set("op", b"many").unwrap();

        let result = ReplayReporter::new(store).replay("op");
        assert!(matches!(
            result,
            Err(CacheError::Decode(DecodeError::InvalidInteger(_)))
        ));
    }
}
