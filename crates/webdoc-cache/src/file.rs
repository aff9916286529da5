//! File-based cache implementation.
//!
//! [`FileCache`] stores cache entries as files on disk, organized into
//! buckets (subdirectories). Each entry is a single file with a binary
//! header followed by the data:
//!
//! ```text
//! [expires_at_unix_millis: u64 LE][data bytes]
//! ```
//!
//! On read, the header is checked against the current clock; an expired
//! entry reads as a miss and its file is removed best-effort.
//!
//! On construction, [`FileCache`] validates a `VERSION` file in the cache
//! root. If the version mismatches or is missing, the entire cache directory
//! is wiped and recreated. This ensures stale caches from previous releases
//! are never used.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Cache, CacheBucket};

/// File-based [`Cache`] rooted at a directory on disk.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- VERSION            # contains the cache version string
/// +-- documents/         # bucket "documents"
/// |   +-- my-doc         # cache entry
/// +-- sheets/            # bucket "sheets"
///     +-- ...
/// ```
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a new file-based cache at `root`, validating the cache version.
    ///
    /// If the `VERSION` file inside `root` does not match `version`, the
    /// entire cache directory is removed and recreated with the new version.
    /// Errors during validation are logged but never fatal.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        validate_version(&root, version);
        Self { root }
    }
}

impl Cache for FileCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(FileCacheBucket {
            dir: self.root.join(name),
        })
    }
}

/// A single bucket backed by a directory on disk.
struct FileCacheBucket {
    dir: PathBuf,
}

impl CacheBucket for FileCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.dir.join(key);
        let mut file = File::open(&path).ok()?;

        // Read expiry timestamp (u64 LE, unix millis)
        let mut header = [0u8; 8];
        file.read_exact(&mut header).ok()?;
        let expires_at = u64::from_le_bytes(header);

        if now_millis() >= expires_at {
            // Stale entry; remove it so the bucket does not accumulate
            drop(file);
            let _ = fs::remove_file(&path);
            return None;
        }

        // Entry is live — read the data
        let mut data = Vec::new();
        file.read_to_end(&mut data).ok()?;
        Some(data)
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) {
        let path = self.dir.join(key);

        // Silently ignore errors — cache is optional
        let Some(parent) = path.parent() else {
            return;
        };
        if fs::create_dir_all(parent).is_err() {
            return;
        }

        let expires_at = now_millis().saturating_add(millis(ttl));
        let mut buf = Vec::with_capacity(8 + value.len());
        buf.extend_from_slice(&expires_at.to_le_bytes());
        buf.extend_from_slice(value);

        let _ = fs::write(&path, &buf);
    }
}

/// Current wall clock as unix milliseconds.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, millis)
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Validate the cache version, wiping the directory on mismatch.
fn validate_version(root: &Path, version: &str) {
    let version_file = root.join("VERSION");

    // Try to read the existing version
    match fs::read_to_string(&version_file) {
        Ok(stored) if stored == version => {
            // Version matches — keep cache
            tracing::debug!("cache version matches: {version}");
            return;
        }
        Ok(stored) => {
            tracing::info!("cache is from version {stored}, current is {version}, wiping");
        }
        Err(_) => {
            tracing::info!("no cache VERSION file, initializing fresh cache");
        }
    }

    // Wipe and recreate
    if root.exists()
        && let Err(e) = fs::remove_dir_all(root)
    {
        tracing::warn!("failed to remove cache directory: {e}");
    }
    if let Err(e) = fs::create_dir_all(root) {
        tracing::warn!("failed to create cache directory: {e}");
        return;
    }
    if let Err(e) = fs::write(&version_file, version) {
        tracing::warn!("failed to write cache VERSION file: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_file_bucket_set_and_get() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("my-doc", b"# Title", HOUR);
        assert_eq!(bucket.get("my-doc"), Some(b"# Title".to_vec()));
    }

    #[test]
    fn test_file_bucket_zero_ttl_expires_immediately() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("key", b"data", Duration::ZERO);
        assert_eq!(bucket.get("key"), None);
    }

    #[test]
    fn test_file_bucket_expired_entry_removed() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");
        let cache = FileCache::new(root.clone(), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("key", b"data", Duration::ZERO);
        assert!(root.join("documents/key").exists());
        assert_eq!(bucket.get("key"), None);
        assert!(!root.join("documents/key").exists());
    }

    #[test]
    fn test_file_bucket_get_nonexistent_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        assert_eq!(bucket.get("nonexistent"), None);
    }

    #[test]
    fn test_file_bucket_overwrite() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("key", b"first", HOUR);
        bucket.set("key", b"second", HOUR);
        assert_eq!(bucket.get("key"), Some(b"second".to_vec()));
    }

    #[test]
    fn test_file_cache_buckets_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        let bucket_a = cache.bucket("alpha");
        let bucket_b = cache.bucket("beta");

        bucket_a.set("key", b"alpha-data", HOUR);
        bucket_b.set("key", b"beta-data", HOUR);

        assert_eq!(bucket_a.get("key"), Some(b"alpha-data".to_vec()));
        assert_eq!(bucket_b.get("key"), Some(b"beta-data".to_vec()));
    }

    #[test]
    fn test_file_bucket_nested_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        bucket.set("team/guide/intro", b"nested content", HOUR);
        assert_eq!(
            bucket.get("team/guide/intro"),
            Some(b"nested content".to_vec())
        );
    }

    #[test]
    fn test_file_bucket_binary_data() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("documents");

        // Binary data including \n, \r, null bytes, and high bytes
        let binary_data: Vec<u8> = vec![0x00, 0x01, 0x0A, 0x0D, 0xFF, 0xFE, 0x80, 0x7F];
        bucket.set("binary", &binary_data, HOUR);
        assert_eq!(bucket.get("binary"), Some(binary_data));
    }

    #[test]
    fn test_version_match_keeps_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        // Create cache and populate it
        let cache = FileCache::new(root.clone(), "v1");
        let bucket = cache.bucket("documents");
        bucket.set("key", b"preserved", HOUR);

        // Recreate with same version — data persists
        let cache2 = FileCache::new(root, "v1");
        let bucket2 = cache2.bucket("documents");
        assert_eq!(bucket2.get("key"), Some(b"preserved".to_vec()));
    }

    #[test]
    fn test_version_mismatch_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        // Create cache and populate it
        let cache = FileCache::new(root.clone(), "v1");
        let bucket = cache.bucket("documents");
        bucket.set("key", b"will-be-wiped", HOUR);

        // Recreate with different version — data gone
        let cache2 = FileCache::new(root.clone(), "v2");
        let bucket2 = cache2.bucket("documents");
        assert_eq!(bucket2.get("key"), None);

        // VERSION file updated
        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v2");
    }

    #[test]
    fn test_missing_version_file_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        // Manually create cache dir with some orphan file but no VERSION
        fs::create_dir_all(root.join("documents")).unwrap();
        fs::write(root.join("documents/orphan"), b"stale data").unwrap();

        // Construct FileCache — orphan files should be gone
        let cache = FileCache::new(root.clone(), "v1");
        let bucket = cache.bucket("documents");
        assert_eq!(bucket.get("orphan"), None);

        // VERSION file created
        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v1");
    }

    #[test]
    fn test_nonexistent_root_creates_version() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("deeply/nested/cache");

        // Root doesn't exist yet
        assert!(!root.exists());

        let _cache = FileCache::new(root.clone(), "v1");

        // Directory and VERSION created
        assert!(root.exists());
        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v1");
    }
}
