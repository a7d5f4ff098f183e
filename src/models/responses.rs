//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheKey;
use crate::recorder::Replay;
use crate::store::StoreStats;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The decoded value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the STORE operation (POST /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Success message
    pub message: String,
    /// The generated key
    pub key: CacheKey,
}

impl StoreResponse {
    /// Creates a new StoreResponse
    pub fn new(key: CacheKey) -> Self {
        Self {
            message: format!("Value stored under '{}'", key),
            key,
        }
    }
}

/// Response body for the replay endpoint (GET /replay/:name)
#[derive(Debug, Clone, Serialize)]
pub struct ReplayResponse {
    #[serde(flatten)]
    pub replay: Replay,
    /// Text rendering of the replay
    pub report: String,
}

impl ReplayResponse {
    pub fn new(replay: Replay) -> Self {
        let report = replay.to_string();
        Self { replay, report }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of reads that found a value
    pub hits: u64,
    /// Number of reads on missing keys
    pub misses: u64,
    /// Number of store commands executed
    pub commands: u64,
    /// Current number of keys, including counters and history lists
    pub total_keys: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            commands: stats.commands,
            total_keys: stats.total_keys,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
