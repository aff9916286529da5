//! `webdoc render` command implementation.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Args;
use webdoc_config::{CliSettings, Config};
use webdoc_fetch::urls;
use webdoc_render::HtmlConverter;

use crate::commands::{build_fetcher, cache_bucket};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document to render: a URL, a local file path, or `-` for stdin.
    source: String,

    /// Treat SOURCE as a hosted document id and fetch its text export.
    #[arg(long)]
    doc: bool,

    /// Path to configuration file (default: auto-discover webdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the HTML fragment to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Escape HTML metacharacters in document text and attribute values.
    #[arg(long)]
    escape: bool,

    /// Relay URL for networks where direct fetching is blocked (overrides config).
    #[arg(long, env = "WEBDOC_RELAY_URL")]
    relay_url: Option<String>,

    /// Disable the fetch cache.
    #[arg(long)]
    no_cache: bool,

    /// Enable verbose output (per-line classification diagnostics).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, retrieval, or output writing fails.
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            relay_url: self.relay_url.clone(),
            cache_enabled: if self.no_cache { Some(false) } else { None },
            cache_ttl_secs: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let text = self.resolve_source(&config, version)?;
        tracing::debug!(bytes = text.len(), "document text resolved");

        let mut converter = HtmlConverter::new().with_verbose(self.verbose);
        if self.escape {
            converter = converter.with_escaping();
        }
        let html = converter.convert(&text);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    /// Resolve the source argument into document text.
    fn resolve_source(&self, config: &Config, version: &str) -> Result<String, CliError> {
        if self.source == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            return Ok(text);
        }

        if !is_remote_source(&self.source, self.doc) {
            return Ok(std::fs::read_to_string(&self.source)?);
        }

        let url = if self.doc {
            urls::document_text_export_url(&self.source)
        } else {
            self.source.clone()
        };
        Output::new().info(&format!("Fetching {url}"));

        let fetcher = build_fetcher(config);
        let bucket = cache_bucket(config, version, "documents");
        Ok(fetcher.fetch_text_cached(&url, bucket.as_ref(), config.cache_ttl())?)
    }
}

/// Whether the source argument names a remote resource.
fn is_remote_source(source: &str, doc: bool) -> bool {
    doc || source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote_source_urls() {
        assert!(is_remote_source("https://a/b.txt", false));
        assert!(is_remote_source("http://a/b.txt", false));
    }

    #[test]
    fn test_is_remote_source_doc_id() {
        assert!(is_remote_source("1AbCdEf", true));
    }

    #[test]
    fn test_is_remote_source_local_path() {
        assert!(!is_remote_source("notes/today.txt", false));
        assert!(!is_remote_source("-", false));
    }
}
