//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Cache, ValueKind};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    GetParams, GetResponse, HealthResponse, ReplayResponse, StatsResponse, StoreRequest,
    StoreResponse,
};
use crate::recorder::{is_log_key, InstrumentedCache, ReplayReporter};
use crate::store::{MemoryStore, SharedStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Backing store, kept concrete for statistics
    pub store: Arc<MemoryStore>,
    /// Cache with its store operation recorded
    pub cache: Arc<InstrumentedCache>,
    /// Reads recorded call history
    pub reporter: ReplayReporter,
    /// Maximum accepted value size in bytes
    pub max_value_size: usize,
}

impl AppState {
    /// Creates a new AppState over `store`.
    ///
    /// Builds the cache (clearing the store) and instruments its store
    /// operation under `operation_name`.
    pub fn new(store: Arc<MemoryStore>, operation_name: &str, max_value_size: usize) -> Result<Self> {
        let shared: SharedStore = store.clone();
        let cache = Arc::new(Cache::new(shared.clone())?);
        Ok(Self {
            store,
            cache: Arc::new(InstrumentedCache::new(cache, operation_name)),
            reporter: ReplayReporter::new(shared),
            max_value_size,
        })
    }

    /// Creates a new AppState from configuration over a fresh in-memory store.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            Arc::new(MemoryStore::new()),
            &config.operation_name,
            config.max_value_size,
        )
    }

    /// Identity under which store calls are recorded.
    pub fn operation_name(&self) -> &str {
        self.cache.name()
    }
}

/// Handler for POST /store
///
/// Stores a value under a generated key through the instrumented operation.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate(state.max_value_size) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let key = state.cache.store(req)?;

    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value, decoded according to the `type` query parameter.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<GetParams>,
) -> Result<Json<GetResponse>> {
    let cache = &state.cache;
    let value = match params.kind {
        ValueKind::Text => cache.get_str(&key)?.map(Value::from),
        ValueKind::Bytes => cache.get(&key)?.map(Value::from),
        ValueKind::Int => cache.get_int(&key)?.map(Value::from),
        ValueKind::Float => cache.get_float(&key)?.map(Value::from),
    };

    match value {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /replay/:name
///
/// Returns the recorded call history of an operation.
/// Log keys (`name:inputs`, `name:outputs`) are not operation names.
pub async fn replay_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ReplayResponse>> {
    if is_log_key(&name) {
        return Err(CacheError::InvalidRequest(format!(
            "'{}' is a call log, not an operation name",
            name
        )));
    }

    let replay = state.reporter.replay(&name)?;
    Ok(Json(ReplayResponse::new(replay)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.store.stats()?;
    Ok(Json(StatsResponse::from(stats)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
