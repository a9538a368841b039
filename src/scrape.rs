//! Fetch-then-extract entry points

use tracing::debug;

use crate::error::Result;
use crate::extractors::{extract_opengraph, ExtractOptions, MetaTree};
use crate::fetcher::{AsyncFetcher, FetchOptions, Fetcher};

/// Options for a full scrape
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    pub extract: ExtractOptions,
    pub fetch: FetchOptions,
}

impl ScrapeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.extract.strict = strict;
        self
    }

    pub fn extract(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    pub fn fetch(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }
}

/// Fetch `url` (blocking) and extract its Open Graph tree.
///
/// `Ok(None)` means strict mode found no Open Graph declaration.
pub fn scrape_blocking(url: &str, options: &ScrapeOptions) -> Result<Option<MetaTree>> {
    let html = Fetcher::new(options.fetch.clone()).fetch(url)?;
    let tree = extract_opengraph(&html, &options.extract);
    debug!(url, found = tree.is_some(), "scrape finished");
    Ok(tree)
}

/// Async variant of [`scrape_blocking`]
pub async fn scrape(url: &str, options: &ScrapeOptions) -> Result<Option<MetaTree>> {
    let html = AsyncFetcher::new(options.fetch.clone()).fetch(url).await?;
    let tree = extract_opengraph(&html, &options.extract);
    debug!(url, found = tree.is_some(), "scrape finished");
    Ok(tree)
}
