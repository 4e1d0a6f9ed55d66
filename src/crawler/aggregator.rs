//! Sequential corpus crawl: discover the frontier, then extract every page
//!
//! One task drives the whole run. Each detail page is fetched with a fresh
//! identity, pages that fail are logged and skipped, and a pacing delay
//! separates consecutive requests.

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::FrontierDiscoverer;
use crate::crawler::identity::{IdentitySource, RotatingIdentity};
use crate::crawler::pacing::{Pacer, RandomPacer};
use crate::models::{ConditionRecord, Corpus};
use crate::parser::ConditionExtractor;
use crate::utils::error::{CrawlerError, FetchError};

/// Drives discovery and extraction over one index page
pub struct CorpusAggregator {
    index_url: String,
    fetcher: Box<dyn PageFetcher>,
    identity: Box<dyn IdentitySource>,
    pacer: Box<dyn Pacer>,
    discoverer: FrontierDiscoverer,
    extractor: ConditionExtractor,
    limit: Option<usize>,
}

impl CorpusAggregator {
    /// Aggregator with default identity pool, pacing and extraction rules
    pub fn new(index_url: impl Into<String>, fetcher: impl PageFetcher + 'static) -> Self {
        Self {
            index_url: index_url.into(),
            fetcher: Box::new(fetcher),
            identity: Box::new(RotatingIdentity::default()),
            pacer: Box::new(RandomPacer::default()),
            discoverer: FrontierDiscoverer::default(),
            extractor: ConditionExtractor::new(crate::config::DEFAULT_CONTENT_MARKER),
            limit: None,
        }
    }

    /// Build the full pipeline from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or the identity
    /// pool is empty
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let fetcher = HttpFetcher::from_config(config)?;
        let identity = RotatingIdentity::new(config.crawler.user_agents.clone())?;
        let (min, max) = config.delay_bounds();

        Ok(Self::new(config.crawler.index_url.clone(), fetcher)
            .with_identity(identity)
            .with_pacer(RandomPacer::new(min, max))
            .with_discoverer(FrontierDiscoverer::new(config.crawler.detail_prefix.clone()))
            .with_extractor(ConditionExtractor::new(
                config.extractor.content_marker.clone(),
            ))
            .with_limit(config.crawler.limit))
    }

    #[must_use]
    pub fn with_identity(mut self, identity: impl IdentitySource + 'static) -> Self {
        self.identity = Box::new(identity);
        self
    }

    #[must_use]
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    #[must_use]
    pub fn with_discoverer(mut self, discoverer: FrontierDiscoverer) -> Self {
        self.discoverer = discoverer;
        self
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: ConditionExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Process at most `limit` detail pages; `None` processes all
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Fetch the index and return the detail-page frontier
    ///
    /// # Errors
    ///
    /// Returns the fetch error if the index cannot be retrieved
    pub async fn discover(&self) -> Result<Vec<String>, FetchError> {
        let identity = self.identity.next_identity();
        self.discoverer
            .collect(self.fetcher.as_ref(), &identity, &self.index_url)
            .await
    }

    /// Fetch one detail page and extract its record
    ///
    /// # Errors
    ///
    /// Returns the fetch error; extraction itself never fails
    pub async fn scrape_one(&self, url: &str) -> Result<ConditionRecord, FetchError> {
        let identity = self.identity.next_identity();
        let html = self.fetcher.fetch(url, &identity).await?;
        Ok(self.extractor.extract(&html, url))
    }

    /// Run the crawl to completion
    ///
    /// # Errors
    ///
    /// - `CrawlerError::IndexUnavailable` if the index cannot be fetched
    /// - `CrawlerError::EmptyFrontier` if the index lists no detail pages
    /// - `CrawlerError::EmptyCorpus` if no detail page yields a record
    pub async fn run(&self) -> Result<Corpus, CrawlerError> {
        tracing::info!(index = %self.index_url, "Discovering detail pages");

        let mut urls = self.discover().await.map_err(|e| {
            tracing::error!(index = %self.index_url, error = %e, "Index page unavailable");
            CrawlerError::IndexUnavailable(e)
        })?;

        if urls.is_empty() {
            tracing::warn!(index = %self.index_url, "No detail pages found on index");
            return Err(CrawlerError::EmptyFrontier);
        }

        let discovered = urls.len();
        if let Some(limit) = self.limit {
            urls.truncate(limit);
        }

        let total = urls.len();
        tracing::info!(discovered, total, "Starting crawl");

        let mut corpus = Corpus::new(discovered);

        for (i, url) in urls.iter().enumerate() {
            tracing::info!(url = %url, "[{}/{}] Scraping", i + 1, total);

            match self.scrape_one(url).await {
                Ok(record) => {
                    tracing::debug!(url = %url, fields = record.fields().len(), "Record extracted");
                    corpus.push(record);
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Failed to scrape page");
                    corpus.record_failure();
                }
            }

            if i + 1 < total {
                let delay = self.pacer.next_delay();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        corpus.finish();

        let stats = corpus.stats();
        tracing::info!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            duration_secs = stats.duration_secs(),
            "Crawl finished"
        );

        if corpus.is_empty() {
            return Err(CrawlerError::EmptyCorpus);
        }

        Ok(corpus)
    }
}
