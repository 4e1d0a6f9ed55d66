//! medscrape - medical-condition corpus crawler
//!
//! Crawls a condition index page, follows every condition detail page it
//! lists, and turns each page's loosely structured markup into a flat
//! key-value record.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Transport, frontier discovery and the sequential run loop
//! - [`parser`] - Heading normalization and record extraction
//! - [`models`] - Records, corpus and run statistics
//! - [`storage`] - JSON and CSV export
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use medscrape::config::Config;
//! use medscrape::crawler::CorpusAggregator;
//! use medscrape::storage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let corpus = CorpusAggregator::from_config(&config)?.run().await?;
//!     storage::save(&corpus, &config.output.path, config.output.format)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{CorpusAggregator, FrontierDiscoverer, HttpFetcher, PageFetcher};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{ConditionRecord, Corpus, CrawlStats};
    pub use crate::parser::{normalize_heading, ConditionExtractor, KeyRegistry};
    pub use crate::storage::OutputFormat;
}

// Direct re-exports for convenience
pub use models::{ConditionRecord, Corpus, CrawlStats};
