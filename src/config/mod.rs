//! Configuration management for the medscrape crawler
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Command-line flags are applied on top by the
//! binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::storage::OutputFormat;

/// Client identities rotated across requests.
///
/// The last entry identifies the corpus project to the site operator.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36",
    "MHI-SymptomChecker/1.0 (hello@mhi.ng)",
];

/// Index page listing every condition
pub const DEFAULT_INDEX_URL: &str = "https://ada.com/conditions";

/// Path prefix shared by all detail pages
pub const DEFAULT_DETAIL_PREFIX: &str = "/conditions/";

/// Class-name fragment carried by content blocks on detail pages.
///
/// Tied to the site's current build output; expect to update it when the
/// site's markup changes.
pub const DEFAULT_CONTENT_MARKER: &str = "Text_wrapper";

/// Accepted values for `logging.format`
pub const LOG_FORMATS: &[&str] = &["text", "json"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Record extractor configuration
    pub extractor: ExtractorConfig,

    /// Corpus output configuration
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Index page address (also the base for resolving links)
    pub index_url: String,

    /// Path prefix a link must carry to be a detail page
    pub detail_prefix: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Lower bound of the polite delay between requests
    pub min_delay_ms: u64,

    /// Upper bound of the polite delay between requests
    pub max_delay_ms: u64,

    /// User-Agent pool, one picked per request
    pub user_agents: Vec<String>,

    /// Process at most this many detail pages
    pub limit: Option<usize>,
}

/// Record extractor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Class-name fragment marking content-bearing elements
    pub content_marker: String,
}

/// Corpus output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path
    pub path: PathBuf,

    /// Output format
    pub format: OutputFormat,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            index_url: String::from(DEFAULT_INDEX_URL),
            detail_prefix: String::from(DEFAULT_DETAIL_PREFIX),
            request_timeout_secs: 10,
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            limit: None,
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            content_marker: String::from(DEFAULT_CONTENT_MARKER),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("conditions.json"),
            format: OutputFormat::Json,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    /// `MEDSCRAPE_USER_AGENTS` holds the pool separated by `|`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let index_url =
            std::env::var("MEDSCRAPE_INDEX_URL").unwrap_or(defaults.crawler.index_url);

        let detail_prefix =
            std::env::var("MEDSCRAPE_DETAIL_PREFIX").unwrap_or(defaults.crawler.detail_prefix);

        let request_timeout_secs = std::env::var("MEDSCRAPE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.crawler.request_timeout_secs);

        let min_delay_ms = std::env::var("MEDSCRAPE_MIN_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.crawler.min_delay_ms);

        let max_delay_ms = std::env::var("MEDSCRAPE_MAX_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.crawler.max_delay_ms);

        let user_agents = std::env::var("MEDSCRAPE_USER_AGENTS")
            .ok()
            .map(|v| parse_user_agents(&v))
            .unwrap_or(defaults.crawler.user_agents);

        let limit = std::env::var("MEDSCRAPE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());

        let content_marker = std::env::var("MEDSCRAPE_CONTENT_MARKER")
            .unwrap_or(defaults.extractor.content_marker);

        let output_path = std::env::var("MEDSCRAPE_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or(defaults.output.path);

        let output_format = std::env::var("MEDSCRAPE_OUTPUT_FORMAT")
            .ok()
            .and_then(|v| v.parse::<OutputFormat>().ok())
            .unwrap_or(defaults.output.format);

        let log_level =
            std::env::var("MEDSCRAPE_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let log_format =
            std::env::var("MEDSCRAPE_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            crawler: CrawlerConfig {
                index_url,
                detail_prefix,
                request_timeout_secs,
                min_delay_ms,
                max_delay_ms,
                user_agents,
                limit,
            },
            extractor: ExtractorConfig { content_marker },
            output: OutputConfig {
                path: output_path,
                format: output_format,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let index = Url::parse(&self.crawler.index_url).map_err(|e| {
            Error::config(format!("index_url {:?} is not a URL: {e}", self.crawler.index_url))
        })?;
        if !matches!(index.scheme(), "http" | "https") {
            return Err(Error::config("index_url must use http or https"));
        }

        if !self.crawler.detail_prefix.starts_with('/') {
            return Err(Error::config("detail_prefix must start with '/'"));
        }

        if self.crawler.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }

        if self.crawler.min_delay_ms > self.crawler.max_delay_ms {
            return Err(Error::config("min_delay_ms must not exceed max_delay_ms"));
        }

        if self.crawler.user_agents.is_empty()
            || self.crawler.user_agents.iter().any(|ua| ua.trim().is_empty())
        {
            return Err(Error::config("user_agents must be a non-empty list of non-blank strings"));
        }

        if self.extractor.content_marker.trim().is_empty() {
            return Err(Error::config("content_marker must not be empty"));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(Error::config(format!(
                "logging.format must be one of {LOG_FORMATS:?}, got {:?}",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }

    /// Get the polite delay bounds as Durations
    #[must_use]
    pub fn delay_bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.crawler.min_delay_ms),
            Duration::from_millis(self.crawler.max_delay_ms),
        )
    }
}

fn parse_user_agents(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_user_agent_pool_rejected() {
        let mut config = Config::default();
        config.crawler.user_agents.clear();
        assert!(config.validate().is_err());

        config.crawler.user_agents = vec!["  ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_delay_bounds_rejected() {
        let mut config = Config::default();
        config.crawler.min_delay_ms = 5000;
        config.crawler.max_delay_ms = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_index_url_rejected() {
        let mut config = Config::default();
        config.crawler.index_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.crawler.index_url = "ftp://example.com/conditions".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_prefix_and_marker_required() {
        let mut config = Config::default();
        config.crawler.detail_prefix = "conditions/".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.extractor.content_marker = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = Config::default();
        config.logging.format = "yaml".to_string();
        assert!(config.validate().is_err());

        config.logging.format = "json".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_and_delay_conversion() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(
            config.delay_bounds(),
            (Duration::from_millis(1000), Duration::from_millis(3000))
        );
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = Config::from_toml_str(
            r#"
            [crawler]
            index_url = "https://example.org/conditions"
            min_delay_ms = 0
            max_delay_ms = 0

            [output]
            format = "csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.crawler.index_url, "https://example.org/conditions");
        assert_eq!(config.crawler.detail_prefix, DEFAULT_DETAIL_PREFIX);
        assert_eq!(config.crawler.max_delay_ms, 0);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.extractor.content_marker, DEFAULT_CONTENT_MARKER);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_user_agents() {
        let pool = parse_user_agents("A/1.0 | B/2.0 (x; y) || ");
        assert_eq!(pool, vec!["A/1.0", "B/2.0 (x; y)"]);
    }
}
