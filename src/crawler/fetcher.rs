//! HTTP page fetcher with charset detection
//!
//! This module provides the transport used for the index and detail pages:
//! - One request per call, no retries
//! - Fixed per-request timeout
//! - Per-request identity (User-Agent) header
//! - Charset detection from Content-Type or `<meta>`, decoded with encoding_rs

use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use reqwest::{Client, Response};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::crawler::headers::build_page_headers;
use crate::utils::error::FetchError;

/// Bytes of the body searched for a `<meta>` charset declaration
const META_SNIFF_LEN: usize = 1024;

static CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([a-z0-9_\-:.]+)"#).unwrap()
});

/// Fetches a page body as text
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` presenting `identity` as the User-Agent
    ///
    /// # Errors
    ///
    /// Any transport failure, timeout or non-success status is a `FetchError`
    async fn fetch(&self, url: &str, identity: &str) -> Result<String, FetchError>;
}

/// reqwest-backed [`PageFetcher`]
pub struct HttpFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    /// Create a fetcher from the crawler configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.request_timeout())
    }

    async fn decode_response(response: Response) -> Result<String, FetchError> {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Decode(format!("failed to read body: {e}"))
            }
        })?;

        Ok(decode_bytes(&bytes, &content_type))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, identity: &str) -> Result<String, FetchError> {
        let target =
            Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        tracing::debug!(url, identity, "Fetching page");

        let response = self
            .client
            .get(target)
            .headers(build_page_headers(identity))
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Self::decode_response(response).await
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(err)
    }
}

/// Decode a body using the charset from `content_type`, else from a
/// `<meta>` declaration near the top of the body, else UTF-8
///
/// Malformed sequences become U+FFFD; the rest of the page is kept.
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> String {
    let encoding = charset_label(content_type.as_bytes())
        .or_else(|| charset_label(&bytes[..bytes.len().min(META_SNIFF_LEN)]))
        .and_then(Encoding::for_label)
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = used.name(), "Replaced malformed bytes while decoding");
    }

    text.into_owned()
}

fn charset_label(haystack: &[u8]) -> Option<&[u8]> {
    CHARSET_REGEX
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let text = "Ménière's disease";
        let decoded = decode_bytes(text.as_bytes(), "text/html; charset=utf-8");
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_decode_latin1_from_header() {
        // "Ménière" in windows-1252
        let bytes: &[u8] = &[0x4d, 0xe9, 0x6e, 0x69, 0xe8, 0x72, 0x65];
        let decoded = decode_bytes(bytes, "text/html; charset=ISO-8859-1");
        assert_eq!(decoded, "Ménière");
    }

    #[test]
    fn test_decode_charset_from_meta() {
        let mut bytes = b"<html><head><meta charset=\"windows-1252\"></head><body>".to_vec();
        bytes.extend_from_slice(&[0x4d, 0xe9, 0x6e, 0x69, 0xe8, 0x72, 0x65]);
        let decoded = decode_bytes(&bytes, "text/html");
        assert!(decoded.ends_with("Ménière"));
    }

    #[test]
    fn test_decode_invalid_utf8_keeps_page() {
        let bytes = b"<div class=\"Text_wrapper\">Fever \xff</div>";
        let decoded = decode_bytes(bytes, "text/html; charset=utf-8");
        assert_eq!(decoded, "<div class=\"Text_wrapper\">Fever \u{FFFD}</div>");
    }

    #[test]
    fn test_unknown_charset_falls_back_to_utf8() {
        let decoded = decode_bytes(b"plain", "text/html; charset=x-made-up");
        assert_eq!(decoded, "plain");
    }

    #[test]
    fn test_fetcher_creation() {
        assert!(HttpFetcher::new(Duration::from_secs(10)).is_ok());
        assert!(HttpFetcher::from_config(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_request() {
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        let result = fetcher.fetch("/conditions/flu", "agent").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
