//! Replay Cache - An instrumented in-memory key-value cache
//!
//! Stores scalar values under random keys, reads them back with typed
//! decoding, and records the call history of the store operation for replay.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod recorder;
pub mod repr;
pub mod store;

pub use api::AppState;
pub use cache::{Cache, CacheKey, StoredValue};
pub use config::Config;
pub use error::{CacheError, DecodeError, Result};
pub use recorder::{
    instrument, CallCounter, CallHistory, InstrumentedCache, Operation, Replay, ReplayReporter,
};
pub use repr::Repr;
pub use store::{KeyValueStore, MemoryStore, SharedStore};
