//! Error types for fetching and scraping

use thiserror::Error;

/// Error type for scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport failure: DNS, connect, TLS, redirect limit or body read
    #[error("Network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a status other than 200
    #[error("Request failed with HTTP status code: {code}")]
    HttpStatus { code: u16 },

    /// URL could not be parsed even after defaulting the scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ScrapeError {
    pub(crate) fn network<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ScrapeError::Network(Box::new(err))
    }

    /// Status code for `HttpStatus` errors
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ScrapeError::HttpStatus { code } => Some(*code),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScrapeError>;
