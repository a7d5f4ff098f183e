//! Cache Module
//!
//! Provides random-key storage of scalar values with typed retrieval.

mod key;
mod store;
mod value;


// Re-export public types
pub use key::CacheKey;
pub use store::Cache;
pub use value::{decode_float, decode_int, decode_utf8, StoredValue, ValueKind};

// == Public Constants ==
/// Operation identity under which `Cache::store` calls are recorded by default
pub const STORE_OPERATION: &str = "Cache.store";
