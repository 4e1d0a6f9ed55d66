//! Crawling: transport, frontier discovery and the sequential run loop
//!
//! - [`fetcher`] - `PageFetcher` trait and the reqwest-backed `HttpFetcher`
//! - [`headers`] - browser-like request headers
//! - [`identity`] - per-request User-Agent selection
//! - [`pacing`] - polite delay between requests
//! - [`frontier`] - detail-page discovery from the index page
//! - [`aggregator`] - the crawl driver producing a [`Corpus`]
//!
//! [`Corpus`]: crate::models::Corpus

pub mod aggregator;
pub mod fetcher;
pub mod frontier;
pub mod headers;
pub mod identity;
pub mod pacing;

pub use aggregator::CorpusAggregator;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use frontier::FrontierDiscoverer;
pub use identity::{FixedIdentity, IdentitySource, RotatingIdentity};
pub use pacing::{FixedPacer, Pacer, RandomPacer};
