//! `webdoc sheet` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use webdoc_config::{CliSettings, Config};
use webdoc_fetch::{csv, urls};

use crate::commands::{build_fetcher, cache_bucket};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sheet command.
#[derive(Args)]
pub(crate) struct SheetArgs {
    /// Spreadsheet id.
    sheet_id: String,

    /// Tab id within the spreadsheet.
    #[arg(long, default_value = "0")]
    gid: String,

    /// Print raw rows instead of header-keyed records.
    #[arg(long)]
    rows: bool,

    /// Path to configuration file (default: auto-discover webdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Relay URL for networks where direct fetching is blocked (overrides config).
    #[arg(long, env = "WEBDOC_RELAY_URL")]
    relay_url: Option<String>,

    /// Disable the fetch cache.
    #[arg(long)]
    no_cache: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SheetArgs {
    /// Execute the sheet command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, retrieval, or serialization fails.
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            relay_url: self.relay_url.clone(),
            cache_enabled: if self.no_cache { Some(false) } else { None },
            cache_ttl_secs: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let fetcher = build_fetcher(&config);
        let bucket = cache_bucket(&config, version, "sheets");
        let url = urls::sheet_csv_export_url(&self.sheet_id, &self.gid);
        let body = fetcher.fetch_text_cached(&url, bucket.as_ref(), config.cache_ttl())?;

        let parsed = csv::parse_rows(&body);
        let json = if self.rows {
            serde_json::to_string_pretty(&parsed)?
        } else {
            let records = csv::rows_to_records(parsed);
            if records.is_empty() {
                output.warning("Sheet has no data rows");
            }
            serde_json::to_string_pretty(&records)?
        };

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
