//! Common test utilities

use std::path::PathBuf;

use medscrape::crawler::{CorpusAggregator, FixedIdentity, FixedPacer, HttpFetcher};
use std::time::Duration;

#[allow(dead_code)]
pub const TEST_AGENT: &str = "medscrape-test/1.0";

/// Read an HTML fixture from `tests/fixtures/html`
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/html")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing fixture {}: {e}", path.display()))
}

/// Index page linking to each of `slugs` under `/conditions/`
#[allow(dead_code)]
pub fn index_page(slugs: &[&str]) -> String {
    let links: String = slugs
        .iter()
        .map(|slug| format!(r#"<li><a href="/conditions/{slug}">{slug}</a></li>"#))
        .collect();
    format!(
        r#"<html><body><a href="/conditions">All</a><ul>{links}</ul></body></html>"#
    )
}

/// Detail page with one marked content block per `(heading, text)` pair
#[allow(dead_code)]
pub fn condition_page(name: &str, sections: &[(&str, &str)]) -> String {
    let body: String = sections
        .iter()
        .map(|(heading, text)| {
            format!(r#"<h2>{heading}</h2><div class="Text_wrapper__a1">{text}</div>"#)
        })
        .collect();
    format!("<html><head><title>{name} | Guide</title></head><body><h1>{name}</h1>{body}</body></html>")
}

/// Aggregator pointed at a mock server, with fixed identity and no pacing
#[allow(dead_code)]
pub fn test_aggregator(server_uri: &str) -> CorpusAggregator {
    let fetcher = HttpFetcher::new(Duration::from_secs(5)).expect("client");
    CorpusAggregator::new(format!("{server_uri}/conditions"), fetcher)
        .with_identity(FixedIdentity::new(TEST_AGENT))
        .with_pacer(FixedPacer::none())
}
