//! Unified error handling for the medscrape crate
//!
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Library code returns the domain errors ([`FetchError`], [`CrawlerError`]);
//! [`Error`] is what crosses module boundaries such as configuration loading
//! and corpus export.

use std::io;
use thiserror::Error;

pub use crate::utils::error::{CrawlerError, FetchError};

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, bad status)
    Network,
    /// Run outcomes with nothing to persist
    Crawl,
    /// Storage and I/O errors
    Storage,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Crawl => write!(f, "crawl"),
            ErrorCategory::Storage => write!(f, "storage"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Other => write!(f, "other"),
        }
    }
}

/// Unified error type for the medscrape crate
#[derive(Error, Debug)]
pub enum Error {
    /// Run-level crawler errors
    #[error("Crawler error: {0}")]
    Crawler(#[from] CrawlerError),

    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is recoverable by running again later
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Crawler(CrawlerError::IndexUnavailable(e)) | Self::Fetch(e) => {
                e.is_recoverable()
            }
            Self::Crawler(_) => false,
            Self::Io(_) => true,
            Self::Json(_) | Self::Toml(_) | Self::Config(_) => false,
        }
    }

    /// Get the error category for handling strategies
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Crawler(CrawlerError::IndexUnavailable(_)) | Self::Fetch(_) => {
                ErrorCategory::Network
            }
            Self::Crawler(_) => ErrorCategory::Crawl,
            Self::Io(_) | Self::Json(_) => ErrorCategory::Storage,
            Self::Toml(_) | Self::Config(_) => ErrorCategory::Config,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
