//! Extension trait for [`CacheBucket`] with typed convenience methods.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Provides `get_json`/`set_json` for serde-serializable types,
/// `get_string`/`set_string` for UTF-8 strings, and a fill-on-miss
/// memoization helper. These are implemented as default methods on an
/// extension trait so that:
///
/// - [`CacheBucket`] stays object-safe with no serde dependency
/// - Implementors only need to handle raw bytes
/// - Callers get ergonomic typed access via a blanket impl
///
/// # Example
///
/// ```
/// use webdoc_cache::{Cache, CacheBucketExt, DEFAULT_TTL, NullCache};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct SheetData { title: String }
///
/// let cache = NullCache;
/// let bucket = cache.bucket("sheets");
///
/// bucket.set_json("sheet", &SheetData { title: "Hello".into() }, DEFAULT_TTL);
/// let data: Option<SheetData> = bucket.get_json("sheet");
/// assert!(data.is_none()); // NullCache always misses
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss, expiry, or deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.get(key)?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, &bytes, ttl);
        }
    }

    /// Retrieve a cached UTF-8 string.
    ///
    /// Returns `None` on cache miss, expiry, or invalid UTF-8.
    fn get_string(&self, key: &str) -> Option<String> {
        let bytes = self.get(key)?;
        String::from_utf8(bytes).ok()
    }

    /// Store a string value in the cache.
    fn set_string(&self, key: &str, value: &str, ttl: Duration) {
        self.set(key, value.as_bytes(), ttl);
    }

    /// Return the cached string for `key`, or fill the cache from `produce`.
    ///
    /// On a miss the freshly produced value is stored with `ttl` before being
    /// returned; a producer failure is passed through and nothing is cached.
    fn get_string_or_else<E>(
        &self,
        key: &str,
        ttl: Duration,
        produce: impl FnOnce() -> Result<String, E>,
    ) -> Result<String, E> {
        if let Some(cached) = self.get_string(key) {
            tracing::debug!(key, "cache hit");
            return Ok(cached);
        }
        let value = produce()?;
        self.set_string(key, &value, ttl);
        Ok(value)
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}
