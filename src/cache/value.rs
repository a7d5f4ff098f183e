//! Stored Value Module
//!
//! The scalar kinds the cache accepts, their byte encoding, and the decode
//! functions used by typed retrieval.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::repr::{float_repr, quote_bytes, quote_text, Repr};

// == Stored Value ==
/// A value accepted by `Cache::store`.
///
/// The store keeps only bytes, so the kind is not persisted. Callers pick the
/// matching typed getter to get it back.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

/// Kind tag of a `StoredValue`, used to pick a decoder at retrieval time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    #[default]
    Bytes,
    Int,
    Float,
}

impl StoredValue {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            StoredValue::Text(_) => ValueKind::Text,
            StoredValue::Bytes(_) => ValueKind::Bytes,
            StoredValue::Int(_) => ValueKind::Int,
            StoredValue::Float(_) => ValueKind::Float,
        }
    }

    // == Encode ==
    /// Byte representation written to the store.
    ///
    /// Text is UTF-8, bytes pass through, numbers are written as decimal text.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(text) => text.as_bytes().to_vec(),
            StoredValue::Bytes(bytes) => bytes.clone(),
            StoredValue::Int(n) => n.to_string().into_bytes(),
            StoredValue::Float(f) => float_repr(*f).into_bytes(),
        }
    }
}

impl Repr for StoredValue {
    fn repr(&self) -> String {
        match self {
            StoredValue::Text(text) => quote_text(text),
            StoredValue::Bytes(bytes) => quote_bytes(bytes),
            StoredValue::Int(n) => n.to_string(),
            StoredValue::Float(f) => float_repr(*f),
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for StoredValue {
    fn from(value: &[u8; N]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Int(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Int(value.into())
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

// == Decoders ==
/// Decodes stored bytes as UTF-8 text.
pub fn decode_utf8(raw: Vec<u8>) -> Result<String, DecodeError> {
    String::from_utf8(raw).map_err(|e| DecodeError::InvalidUtf8(e.utf8_error().to_string()))
}

/// Decodes stored bytes as a base-10 integer. Surrounding whitespace is allowed.
pub fn decode_int(raw: Vec<u8>) -> Result<i64, DecodeError> {
    let text = String::from_utf8_lossy(&raw);
    text.trim()
        .parse::<i64>()
        .map_err(|_| DecodeError::InvalidInteger(text.into_owned()))
}

/// Decodes stored bytes as a decimal float. Surrounding whitespace is allowed.
pub fn decode_float(raw: Vec<u8>) -> Result<f64, DecodeError> {
    let text = String::from_utf8_lossy(&raw);
    text.trim()
        .parse::<f64>()
        .map_err(|_| DecodeError::InvalidFloat(text.into_owned()))
}
