use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A composed variant cache key.
///
/// The key is a readable composite string, e.g. `hero_#lang:EN_#dev:Default`.
/// It is neither hashed nor normalised; treat it as an opaque lookup key for
/// the output cache.
///
/// # Examples
///
/// ```
/// use varykey_core::CacheKey;
///
/// let key = CacheKey::from("hero_#lang:EN");
/// assert_eq!(key.as_str(), "hero_#lang:EN");
/// assert_eq!(key.to_string(), "hero_#lang:EN");
/// assert_eq!(key.into_string(), String::from("hero_#lang:EN"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for CacheKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CacheKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CacheKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CacheKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
