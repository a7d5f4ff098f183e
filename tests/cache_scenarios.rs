//! Scenario Tests for the Cache, Recorders and Replay
//!
//! Drives the public library API end to end over an in-memory store.

use std::sync::Arc;

use replay_cache::{
    instrument, Cache, CacheError, CallCounter, CallHistory, DecodeError, InstrumentedCache,
    KeyValueStore, MemoryStore, Operation, ReplayReporter, SharedStore, StoredValue,
};

// == Helper Functions ==

fn new_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

// == Typed Round-Trip ==

#[test]
fn test_store_text_then_int() {
    let cache = Cache::new(new_store()).unwrap();

    let k1 = cache.store("foo").unwrap();
    assert_eq!(cache.get_str(&k1).unwrap(), Some("foo".to_string()));

    let k2 = cache.store(42).unwrap();
    assert_eq!(cache.get_int(&k2).unwrap(), Some(42));
}

#[test]
fn test_round_trip_every_kind() {
    let cache = Cache::new(new_store()).unwrap();

    let text = cache.store("héllo").unwrap();
    let bytes = cache.store(b"\x00\x01\xfe").unwrap();
    let int = cache.store(-123_456_789i64).unwrap();
    let float = cache.store(6.02e23).unwrap();

    assert_eq!(cache.get_str(&text).unwrap().as_deref(), Some("héllo"));
    assert_eq!(cache.get(&bytes).unwrap(), Some(vec![0u8, 1, 0xfe]));
    assert_eq!(cache.get_int(&int).unwrap(), Some(-123_456_789));
    assert_eq!(cache.get_float(&float).unwrap(), Some(6.02e23));
}

#[test]
fn test_missing_key_is_absent_with_or_without_decoder() {
    let cache = Cache::new(new_store()).unwrap();

    assert_eq!(cache.get("missing").unwrap(), None);
    let decoded = cache
        .get_with("missing", |_raw| -> Result<i64, DecodeError> {
            panic!("decoder must not run on absent data")
        })
        .unwrap();
    assert_eq!(decoded, None);
}

#[test]
fn test_get_int_on_non_numeric_fails() {
    let cache = Cache::new(new_store()).unwrap();
    let key = cache.store("forty-two").unwrap();

    let err = cache.get_int(&key).unwrap_err();
    assert!(matches!(err, CacheError::Decode(DecodeError::InvalidInteger(_))));
}

#[test]
fn test_new_cache_starts_fresh_session() {
    let store = new_store();
    let first = Cache::new(store.clone()).unwrap();
    let key = first.store("stale").unwrap();

    let second = Cache::new(store).unwrap();
    assert_eq!(second.get(&key).unwrap(), None);
}

// == Instrumentation and Replay ==

#[test]
fn test_replay_after_two_recorded_calls() {
    let store = new_store();
    let cache = Cache::new(store.clone()).unwrap();
    let recorded = instrument(&cache, "store", store.clone());

    let key1 = recorded.call((StoredValue::from(b"first"),)).unwrap();
    let key2 = recorded.call((StoredValue::from(b"second"),)).unwrap();

    let report = ReplayReporter::new(store).report("store").unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "store was called 2 times:");
    assert_eq!(lines[1], format!("store((b'first',)) -> {}", key1));
    assert_eq!(lines[2], format!("store((b'second',)) -> {}", key2));
}

#[test]
fn test_wrapped_cache_keeps_store_call_shape() {
    let store = new_store();
    let cache = InstrumentedCache::new(Arc::new(Cache::new(store.clone()).unwrap()), "Cache.store");

    let key1 = cache.store(b"first").unwrap();
    let key2 = cache.store("second").unwrap();
    assert_eq!(cache.get(&key1).unwrap(), Some(b"first".to_vec()));

    let report = ReplayReporter::new(store).report("Cache.store").unwrap();
    assert_eq!(
        report,
        format!(
            "Cache.store was called 2 times:\nCache.store((b'first',)) -> {}\nCache.store(('second',)) -> {}",
            key1, key2
        )
    );
}

#[test]
fn test_unwrapped_store_leaves_no_history() {
    let store = new_store();
    let cache = Cache::new(store.clone()).unwrap();
    cache.store("a").unwrap();

    let report = ReplayReporter::new(store).report("Cache.store").unwrap();
    assert_eq!(report, "Cache.store was called 0 times:");
}

#[test]
fn test_recorded_store_matches_plain_store_contract() {
    let store = new_store();
    let cache = Arc::new(Cache::new(store.clone()).unwrap());
    let recorded = instrument(cache.clone(), "Cache.store", store);

    let key = recorded.call((StoredValue::from(2.5),)).unwrap();
    assert_eq!(cache.get_float(&key).unwrap(), Some(2.5));
}

#[test]
fn test_history_can_wrap_counter() {
    let store = new_store();
    let cache = Cache::new(store.clone()).unwrap();
    let history_outside = CallHistory::new(
        CallCounter::new(&cache, "op", store.clone()),
        "op",
        store.clone(),
    );

    for value in ["a", "b", "c"] {
        history_outside.call((StoredValue::from(value),)).unwrap();
    }

    let replay = ReplayReporter::new(store).replay("op").unwrap();
    assert_eq!(replay.count, 3);
    assert_eq!(replay.calls.len(), 3);
    assert_eq!(replay.calls[2].input, "('c',)");
    assert!(replay.is_consistent());
}

#[test]
fn test_separate_operations_do_not_share_history() {
    let store = new_store();
    let cache = Cache::new(store.clone()).unwrap();
    let left = instrument(&cache, "left", store.clone());
    let right = instrument(&cache, "right", store.clone());

    left.call((StoredValue::from(1),)).unwrap();
    right.call((StoredValue::from(2),)).unwrap();
    right.call((StoredValue::from(3),)).unwrap();

    let reporter = ReplayReporter::new(store);
    assert_eq!(reporter.replay("left").unwrap().count, 1);
    assert_eq!(reporter.replay("right").unwrap().count, 2);
}

// == Failure Propagation ==

/// A store whose list operations are rejected.
struct ListlessStore {
    inner: MemoryStore,
}

impl KeyValueStore for ListlessStore {
    fn set(&self, key: &str, value: &[u8]) -> replay_cache::Result<()> {
        self.inner.set(key, value)
    }

    fn get(&self, key: &str) -> replay_cache::Result<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn append_to_list(&self, _key: &str, _value: &str) -> replay_cache::Result<usize> {
        Err(CacheError::StorageUnavailable("connection refused".to_string()))
    }

    fn range_of_list(&self, key: &str, start: i64, end: i64) -> replay_cache::Result<Vec<Vec<u8>>> {
        self.inner.range_of_list(key, start, end)
    }

    fn increment(&self, key: &str) -> replay_cache::Result<i64> {
        self.inner.increment(key)
    }

    fn clear_all(&self) -> replay_cache::Result<()> {
        self.inner.clear_all()
    }
}

#[test]
fn test_storage_failure_propagates_through_recorders() {
    let store: SharedStore = Arc::new(ListlessStore {
        inner: MemoryStore::new(),
    });
    let cache = Cache::new(store.clone()).unwrap();
    let recorded = instrument(&cache, "op", store.clone());

    let err = recorded.call((StoredValue::from("x"),)).unwrap_err();
    assert!(matches!(err, CacheError::StorageUnavailable(_)));

    // The counter ran before the failing append and is not rolled back
    assert_eq!(store.get("op").unwrap(), Some(b"1".to_vec()));
}
