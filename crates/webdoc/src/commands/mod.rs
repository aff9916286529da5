//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod sheet;

pub(crate) use render::RenderArgs;
pub(crate) use sheet::SheetArgs;

use webdoc_cache::{Cache, CacheBucket, FileCache, NullCache};
use webdoc_config::Config;
use webdoc_fetch::{DEFAULT_PROBE_URL, Fetcher, FetcherOptions};

/// Build a fetcher from the loaded configuration.
pub(crate) fn build_fetcher(config: &Config) -> Fetcher {
    Fetcher::new(FetcherOptions {
        relay_url: config.fetch.relay_url.clone(),
        probe_url: config
            .fetch
            .probe_url
            .clone()
            .unwrap_or_else(|| DEFAULT_PROBE_URL.to_owned()),
        timeout: config.fetch_timeout(),
    })
}

/// Open a named cache bucket per configuration, or a null bucket when
/// caching is disabled.
pub(crate) fn cache_bucket(config: &Config, version: &str, name: &str) -> Box<dyn CacheBucket> {
    if config.cache.enabled {
        FileCache::new(config.cache_dir(), version).bucket(name)
    } else {
        NullCache.bucket(name)
    }
}
