use anyhow::{Context, Result};

use medscrape::config::Config;
use medscrape::crawler::CorpusAggregator;

pub async fn discover(config: Config) -> Result<()> {
    let aggregator =
        CorpusAggregator::from_config(&config).context("Failed to initialize crawler")?;

    let urls = aggregator
        .discover()
        .await
        .with_context(|| format!("Failed to fetch index {}", aggregator.index_url()))?;

    for url in &urls {
        println!("{url}");
    }
    eprintln!("{} detail pages found", urls.len());

    Ok(())
}
