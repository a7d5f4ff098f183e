//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::{StoredValue, ValueKind};

/// Request body for the STORE operation (POST /store)
///
/// The value is tagged with its kind:
/// `{"type": "text", "value": "foo"}`, `{"type": "int", "value": 42}`,
/// `{"type": "float", "value": 1.5}`, `{"type": "bytes", "value": [0, 255]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum StoreRequest {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl StoreRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, max_value_size: usize) -> Option<String> {
        let size = match self {
            StoreRequest::Text(text) => text.len(),
            StoreRequest::Bytes(bytes) => bytes.len(),
            StoreRequest::Int(_) => return None,
            StoreRequest::Float(f) => {
                if !f.is_finite() {
                    return Some("Float value must be finite".to_string());
                }
                return None;
            }
        };
        if size > max_value_size {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                max_value_size
            ));
        }
        None
    }
}

impl From<StoreRequest> for StoredValue {
    fn from(req: StoreRequest) -> Self {
        match req {
            StoreRequest::Text(text) => StoredValue::Text(text),
            StoreRequest::Bytes(bytes) => StoredValue::Bytes(bytes),
            StoreRequest::Int(n) => StoredValue::Int(n),
            StoreRequest::Float(f) => StoredValue::Float(f),
        }
    }
}

/// Query string for GET /get/:key
///
/// `type` selects the decoder; raw bytes when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetParams {
    #[serde(rename = "type", default)]
    pub kind: ValueKind,
}
