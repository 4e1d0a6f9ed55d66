//! Detail-page discovery from the index page
//!
//! Every link on the index is resolved against the index address and kept
//! when it points at a detail page on the same site. The result is
//! de-duplicated and sorted so repeated runs visit pages in the same order.

use scraper::Html;
use std::collections::BTreeSet;
use url::Url;

use crate::config::DEFAULT_DETAIL_PREFIX;
use crate::crawler::fetcher::PageFetcher;
use crate::parser::selectors::LINK;
use crate::utils::error::FetchError;

/// Detail-page link filter for index documents
#[derive(Debug, Clone)]
pub struct FrontierDiscoverer {
    /// Path prefix shared by detail pages, e.g. `/conditions/`
    prefix: String,
}

impl FrontierDiscoverer {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Extract candidate detail-page URLs from an index document
    ///
    /// # Arguments
    ///
    /// * `html` - Index page markup
    /// * `base_url` - Address the index was fetched from; relative links
    ///   resolve against it
    ///
    /// # Returns
    ///
    /// Sorted, de-duplicated absolute URLs without fragments. No matching
    /// links is an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if `base_url` is not absolute
    ///
    /// # Examples
    ///
    /// ```
    /// use medscrape::crawler::frontier::FrontierDiscoverer;
    ///
    /// let html = r#"<a href="/conditions/flu">Flu</a><a href="/about">About</a>"#;
    /// let urls = FrontierDiscoverer::new("/conditions/")
    ///     .discover(html, "https://example.com/conditions")
    ///     .unwrap();
    /// assert_eq!(urls, vec!["https://example.com/conditions/flu"]);
    /// ```
    pub fn discover(&self, html: &str, base_url: &str) -> Result<Vec<String>, FetchError> {
        let base = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;

        let document = Html::parse_document(html);
        let mut urls = BTreeSet::new();

        for link in document.select(&LINK) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };

            match self.qualify(&base, href) {
                Some(url) => {
                    urls.insert(url);
                }
                None => tracing::trace!(href, "Skipping non-detail link"),
            }
        }

        tracing::debug!(base = %base, count = urls.len(), "Discovered detail pages");

        Ok(urls.into_iter().collect())
    }

    /// Fetch the index page and discover its detail pages
    ///
    /// # Errors
    ///
    /// Returns the fetch error if the index cannot be retrieved
    pub async fn collect(
        &self,
        fetcher: &dyn PageFetcher,
        identity: &str,
        index_url: &str,
    ) -> Result<Vec<String>, FetchError> {
        let html = fetcher.fetch(index_url, identity).await?;
        self.discover(&html, index_url)
    }

    /// Absolute detail-page URL for `href`, or `None` if it does not qualify
    fn qualify(&self, base: &Url, href: &str) -> Option<String> {
        let mut url = base.join(href.trim()).ok()?;

        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        if url.host_str() != base.host_str()
            || url.port_or_known_default() != base.port_or_known_default()
        {
            return None;
        }

        let path = url.path();
        if !path.starts_with(&self.prefix) || self.is_bare_prefix(path) {
            return None;
        }

        url.set_fragment(None);
        Some(url.into())
    }

    fn is_bare_prefix(&self, path: &str) -> bool {
        path.trim_end_matches('/') == self.prefix.trim_end_matches('/')
    }
}

impl Default for FrontierDiscoverer {
    fn default() -> Self {
        Self::new(DEFAULT_DETAIL_PREFIX)
    }
}
