//! Page fetching
//!
//! Both fetchers normalize the URL, follow redirects with a per-request
//! cookie jar, decompress transparently and accept only HTTP 200.

use std::time::Duration;

use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{Result, ScrapeError};

/// Scheme prepended to URLs given without one
pub const DEFAULT_SCHEME: &str = "http";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Prepend [`DEFAULT_SCHEME`] when `input` has no scheme, then re-serialize.
///
/// ASCII tab and newline characters are removed first, as the URL parser
/// does, so they cannot split a scheme. `example.com:8080/x` parses with
/// the scheme `example.com`, so a scheme only counts when it is followed
/// by `://`.
pub fn normalize_url(input: &str) -> Result<Url> {
    let input: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();
    let input = input.as_str();

    match Url::parse(input) {
        Ok(url)
            if input
                .get(url.scheme().len()..)
                .is_some_and(|rest| rest.starts_with("://")) =>
        {
            Ok(url)
        }
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            Ok(Url::parse(&format!("{}://{}", DEFAULT_SCHEME, input))?)
        }
        Err(e) => Err(e.into()),
    }
}

/// Transport settings shared by both fetchers
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirects: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("og_scraper/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}

fn check_status(code: u16, url: &Url) -> Result<()> {
    if code == 200 {
        Ok(())
    } else {
        warn!(%url, code, "fetch returned non-200 status");
        Err(ScrapeError::HttpStatus { code })
    }
}

/// Blocking fetcher built on `ureq`
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    options: FetchOptions,
}

impl Fetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    /// GET `url` and return the body text.
    ///
    /// A fresh agent per call keeps cookies scoped to this request's redirects.
    #[instrument(skip(self), level = "debug")]
    pub fn fetch(&self, url: &str) -> Result<String> {
        let url = normalize_url(url)?;

        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(self.options.timeout))
                .user_agent(self.options.user_agent.as_str())
                .max_redirects(self.options.max_redirects)
                .http_status_as_error(false)
                .build(),
        );

        let response = agent.get(url.as_str()).call().map_err(|e| {
            warn!(%url, error = %e, "fetch failed");
            ScrapeError::network(e)
        })?;

        check_status(response.status().as_u16(), &url)?;

        let body = response
            .into_body()
            .read_to_string()
            .map_err(ScrapeError::network)?;
        debug!(%url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

/// Async fetcher built on `reqwest`
#[derive(Debug, Clone, Default)]
pub struct AsyncFetcher {
    options: FetchOptions,
}

impl AsyncFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    /// GET `url` and return the body text
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let url = normalize_url(url)?;

        let client = reqwest::Client::builder()
            .timeout(self.options.timeout)
            .user_agent(self.options.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(
                self.options.max_redirects as usize,
            ))
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(ScrapeError::network)?;

        let response = client.get(url.clone()).send().await.map_err(|e| {
            warn!(%url, error = %e, "fetch failed");
            ScrapeError::network(e)
        })?;

        check_status(response.status().as_u16(), &url)?;

        let body = response.text().await.map_err(ScrapeError::network)?;
        debug!(%url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
