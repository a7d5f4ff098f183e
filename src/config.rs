//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::STORE_OPERATION;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Identity under which store calls are counted and logged
    pub operation_name: String,
    /// Maximum accepted value size in bytes
    pub max_value_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `OPERATION_NAME` - Recorded operation identity (default: `Cache.store`)
    /// - `MAX_VALUE_SIZE` - Maximum value size in bytes (default: 1 MiB)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            operation_name: env::var("OPERATION_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.operation_name),
            max_value_size: env::var("MAX_VALUE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_value_size),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            operation_name: STORE_OPERATION.to_string(),
            max_value_size: 1024 * 1024,
        }
    }
}
