//! Error types for the medscrape crawler
//!
//! This module defines the transport and run-level error types used
//! throughout the application.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Content decoding error
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Whether the same address might succeed on a later run.
    ///
    /// The crawler never retries within a run; this only feeds diagnostics.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::Status(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

/// Run-level crawler outcomes that end a crawl without a corpus
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// The index page could not be fetched, so there is no frontier
    #[error("Index page unavailable: {0}")]
    IndexUnavailable(#[from] FetchError),

    /// The index page was read but links to no detail pages
    #[error("No condition URLs found on index page")]
    EmptyFrontier,

    /// Every detail page failed or none were processed
    #[error("Empty corpus: no condition records were extracted")]
    EmptyCorpus,
}
