//! Configuration management for webdoc.
//!
//! Parses `webdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `fetch.relay_url`
//! - `fetch.probe_url`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use expand::expand_env;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "webdoc.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override relay URL for fetch fallback.
    pub relay_url: Option<String>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
    /// Override cache entry lifetime in seconds.
    pub cache_ttl_secs: Option<u64>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fetch configuration.
    pub fetch: FetchConfig,
    /// Cache configuration.
    pub cache: CacheConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Fetch configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Relay prefix for networks where direct fetching is blocked.
    pub relay_url: Option<String>,
    /// Probe URL deciding direct vs relayed fetching.
    pub probe_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            probe_url: None,
            timeout_secs: 30,
        }
    }
}

/// Cache configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether fetched values are cached at all.
    pub enabled: bool,
    /// Cache directory; relative paths resolve against the config file's
    /// directory (or the working directory with no config file).
    pub dir: Option<PathBuf>,
    /// Entry lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            ttl_secs: 24 * 60 * 60,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`fetch.relay_url`").
        field: String,
        /// Error message (e.g., "${`WEBDOC_RELAY`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `webdoc.toml` in current directory and
    /// parents, falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing
    /// fails, or env expansion references an unset variable.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Resolved cache directory.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        match &self.cache.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => base.join(dir),
            None => base.join(".webdoc/cache"),
        }
    }

    /// Per-request fetch timeout.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs)
    }

    /// Cache entry lifetime.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.expand_env_fields()?;
        Ok(config)
    }

    /// Search for `webdoc.toml` upward from the current directory.
    fn discover_config() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    fn expand_env_fields(&mut self) -> Result<(), ConfigError> {
        if let Some(relay_url) = &self.fetch.relay_url {
            self.fetch.relay_url = Some(expand_env(relay_url, "fetch.relay_url")?);
        }
        if let Some(probe_url) = &self.fetch.probe_url {
            self.fetch.probe_url = Some(expand_env(probe_url, "fetch.probe_url")?);
        }
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(relay_url) = &settings.relay_url {
            self.fetch.relay_url = Some(relay_url.clone());
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache.enabled = cache_enabled;
        }
        if let Some(ttl_secs) = settings.cache_ttl_secs {
            self.cache.ttl_secs = ttl_secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_config_file() {
        let config = Config::default();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 86_400);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.fetch.relay_url, None);
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"
[fetch]
relay_url = "https://relay.example/?"
timeout_secs = 5

[cache]
enabled = false
ttl_secs = 60
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(
            config.fetch.relay_url.as_deref(),
            Some("https://relay.example/?")
        );
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert!(!config.cache.enabled);
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/webdoc.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[cache]\nttl_secs = 120\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.cache.ttl_secs, 120);
        assert!(config.cache.enabled);
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_cli_settings_override() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[cache]\nenabled = true\n");

        let settings = CliSettings {
            relay_url: Some("https://other.example/?".to_owned()),
            cache_enabled: Some(false),
            cache_ttl_secs: Some(10),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(
            config.fetch.relay_url.as_deref(),
            Some("https://other.example/?")
        );
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 10);
    }

    #[test]
    fn test_cache_dir_relative_to_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[cache]\ndir = \"my-cache\"\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.cache_dir(), tmp.path().join("my-cache"));
    }

    #[test]
    fn test_cache_dir_default_under_config_dir() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.cache_dir(), tmp.path().join(".webdoc/cache"));
    }

    #[test]
    fn test_cache_dir_without_config_file() {
        let config = Config::default();
        assert_eq!(config.cache_dir(), PathBuf::from("./.webdoc/cache"));
    }

    #[test]
    fn test_env_expansion_in_relay_url() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            "[fetch]\nrelay_url = \"${WEBDOC_CFG_RELAY:-https://fallback.example/?}\"\n",
        );

        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WEBDOC_CFG_RELAY");
        }
        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(
            config.fetch.relay_url.as_deref(),
            Some("https://fallback.example/?")
        );
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "not valid toml [");

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
