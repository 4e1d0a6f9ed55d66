use anyhow::{Context, Result};

use medscrape::config::Config;
use medscrape::crawler::CorpusAggregator;

pub async fn extract(config: Config, url: String) -> Result<()> {
    let aggregator =
        CorpusAggregator::from_config(&config).context("Failed to initialize crawler")?;

    let record = aggregator
        .scrape_one(&url)
        .await
        .with_context(|| format!("Failed to fetch {url}"))?;

    let json = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;
    println!("{json}");

    Ok(())
}
