//! Open Graph scraper
//!
//! Fetches a web page and extracts its Open Graph metadata into a nested
//! tree:
//! - namespace discovery through `xmlns:` declarations
//! - colon-delimited property paths split into nested objects
//! - repeated properties collected into lists
//!
//! The extractor works on plain HTML text and does not need the fetcher.

pub mod error;
pub mod extractors;
pub mod fetcher;
pub mod ffi;
pub mod scrape;

pub use error::{Result, ScrapeError};
pub use extractors::*;
pub use fetcher::{normalize_url, AsyncFetcher, FetchOptions, Fetcher};
pub use ffi::*;
pub use scrape::{scrape, scrape_blocking, ScrapeOptions};
