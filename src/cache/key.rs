//! Cache Key Module

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repr::{quote_text, Repr};

// == Cache Key ==
/// Opaque key returned by `Cache::store`.
///
/// A fresh random (v4) UUID in its hyphenated form. Never derived from the
/// stored value, so storing the same value twice yields two keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Generates a new random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Repr for CacheKey {
    fn repr(&self) -> String {
        quote_text(&self.0)
    }
}
