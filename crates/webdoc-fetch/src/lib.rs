//! HTTP retrieval of exported documents and sheets.
//!
//! [`Fetcher`] wraps a pooled HTTP agent and knows how to pull the plain-text
//! and CSV exports the renderer and CLI consume. When a relay URL is
//! configured, a one-time connectivity probe at construction decides whether
//! requests go out directly or are routed through the relay — some networks
//! block the document host but allow the relay.
//!
//! The conversion engine downstream is agnostic to everything here; it only
//! needs the full document text as a `\n`-separated UTF-8 string.
//!
//! # Example
//!
//! ```no_run
//! use webdoc_fetch::{FetchError, Fetcher, FetcherOptions};
//!
//! fn load(doc_id: &str) -> Result<String, FetchError> {
//!     let fetcher = Fetcher::new(FetcherOptions::default());
//!     fetcher.fetch_document_text(doc_id)
//! }
//! ```

use std::borrow::Cow;
use std::time::Duration;

use ureq::Agent;
use webdoc_cache::{CacheBucket, CacheBucketExt};

pub mod csv;
mod error;
pub mod urls;

pub use csv::Record;
pub use error::FetchError;

/// Probe target used to decide between direct and relayed fetching.
pub const DEFAULT_PROBE_URL: &str = "https://docs.google.com/robots.txt";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Construction options for [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetcherOptions {
    /// Relay prefix prepended to target URLs when direct fetching fails the
    /// probe. `None` disables relaying entirely.
    pub relay_url: Option<String>,
    /// URL fetched once at construction to test direct connectivity. Only
    /// consulted when a relay is configured.
    pub probe_url: String,
    /// Global timeout applied to every request.
    pub timeout: Duration,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            relay_url: None,
            probe_url: DEFAULT_PROBE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// How requests are routed after the connectivity probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RouteMode {
    Direct,
    Relayed,
}

/// Retrieves document text over HTTP, optionally through a relay.
///
/// Owns a connection-pooling agent; construct once and reuse for multiple
/// fetches.
pub struct Fetcher {
    agent: Agent,
    relay_url: Option<String>,
    route: RouteMode,
}

impl Fetcher {
    /// Create a fetcher, probing connectivity when a relay is configured.
    ///
    /// The probe never fails construction: an unreachable probe target just
    /// flips subsequent requests onto the relay.
    #[must_use]
    pub fn new(options: FetcherOptions) -> Self {
        let agent = create_agent(options.timeout);
        let route = if options.relay_url.is_some() {
            probe(&agent, &options.probe_url)
        } else {
            RouteMode::Direct
        };
        Self {
            agent,
            relay_url: options.relay_url,
            route,
        }
    }

    /// Fetch the full body of `url` as a UTF-8 string.
    pub fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let target = self.route_url(url);
        tracing::debug!(url = %target, "fetching text");

        let response = self.agent.get(target.as_ref()).call()?;
        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(FetchError::Status {
                status,
                body: error_body,
            });
        }

        Ok(body.read_to_string()?)
    }

    /// Fetch `url`, memoized through `bucket` under the URL itself.
    pub fn fetch_text_cached(
        &self,
        url: &str,
        bucket: &dyn CacheBucket,
        ttl: Duration,
    ) -> Result<String, FetchError> {
        bucket.get_string_or_else(url, ttl, || self.fetch_text(url))
    }

    /// Fetch a hosted document's plain-text export.
    pub fn fetch_document_text(&self, doc_id: &str) -> Result<String, FetchError> {
        self.fetch_text(&urls::document_text_export_url(doc_id))
    }

    /// Fetch one tab of a hosted spreadsheet as rows of cells.
    pub fn fetch_sheet_rows(&self, sheet_id: &str, gid: &str) -> Result<Vec<Vec<String>>, FetchError> {
        let body = self.fetch_text(&urls::sheet_csv_export_url(sheet_id, gid))?;
        Ok(csv::parse_rows(&body))
    }

    /// Fetch one tab of a hosted spreadsheet as header-keyed records.
    pub fn fetch_sheet_records(&self, sheet_id: &str, gid: &str) -> Result<Vec<Record>, FetchError> {
        Ok(csv::rows_to_records(self.fetch_sheet_rows(sheet_id, gid)?))
    }

    fn route_url<'a>(&self, url: &'a str) -> Cow<'a, str> {
        match (&self.relay_url, self.route) {
            (Some(relay), RouteMode::Relayed) => Cow::Owned(format!("{relay}{url}")),
            _ => Cow::Borrowed(url),
        }
    }
}

/// Create an HTTP agent with the specified timeout.
///
/// Error statuses are surfaced as responses rather than transport errors so
/// the response body stays readable for diagnostics.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Decide the route by fetching the probe target once.
fn probe(agent: &Agent, url: &str) -> RouteMode {
    match agent.get(url).call() {
        Ok(response) if response.status().is_success() => RouteMode::Direct,
        Ok(response) => {
            tracing::info!(
                status = response.status().as_u16(),
                "connectivity probe refused, relaying requests"
            );
            RouteMode::Relayed
        }
        Err(e) => {
            tracing::info!("connectivity probe failed ({e}), relaying requests");
            RouteMode::Relayed
        }
    }
}
