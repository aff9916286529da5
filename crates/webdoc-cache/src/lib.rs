//! Cache abstraction layer for webdoc.
//!
//! This crate provides generic caching traits that decouple cache consumers
//! from the underlying storage mechanism. Two traits form the core API:
//!
//! - [`Cache`]: Factory for named cache buckets
//! - [`CacheBucket`]: Key-value store with per-entry time-to-live
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: No-op implementations (always miss)
//! - [`FileCache`]: File-based implementation with version validation
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use webdoc_cache::{Cache, NullCache};
//!
//! let cache = NullCache;
//! let bucket = cache.bucket("documents");
//! bucket.set("my-doc", b"# Title", Duration::from_secs(60));
//! assert_eq!(bucket.get("my-doc"), None); // NullCache always misses
//! ```

use std::time::Duration;

mod ext;
mod file;
pub use ext::CacheBucketExt;
pub use file::FileCache;

/// Default entry lifetime: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A named partition within a [`Cache`].
///
/// Each bucket stores key-value pairs where values expire after the
/// time-to-live given at store time. A cache hit occurs only while the entry
/// is younger than its TTL; an expired entry reads as a miss.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `Some(value)` if the key exists and its TTL has not elapsed.
    /// Returns `None` on cache miss or expiry.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value in the cache with the given lifetime.
    ///
    /// Overwrites any existing entry for the same key, regardless of the
    /// previous entry's remaining lifetime.
    fn set(&self, key: &str, value: &[u8], ttl: Duration);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// A `Cache` produces buckets that are logically isolated from each other.
/// For example, a file-based cache might store each bucket in a separate
/// subdirectory.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Calling `bucket` multiple times with the same name may return
    /// independent handles that share the same underlying storage.
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
///
/// Every `get` returns `None`; every `set` is silently discarded.
/// Used as the bucket type for [`NullCache`].
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled. All operations are no-ops and all lookups
/// return `None`.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}
