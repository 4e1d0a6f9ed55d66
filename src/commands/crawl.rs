use anyhow::{Context, Result};

use medscrape::config::Config;
use medscrape::crawler::CorpusAggregator;
use medscrape::storage;

pub async fn crawl(config: Config) -> Result<()> {
    println!("Starting condition crawl");
    println!("========================");
    println!("  Index:  {}", config.crawler.index_url);
    println!(
        "  Output: {} ({})",
        config.output.path.display(),
        config.output.format
    );
    if let Some(limit) = config.crawler.limit {
        println!("  Limit:  {limit}");
    }
    println!();

    let aggregator =
        CorpusAggregator::from_config(&config).context("Failed to initialize crawler")?;

    let corpus = aggregator.run().await.context("Crawl did not produce a corpus")?;

    storage::save(&corpus, &config.output.path, config.output.format).with_context(|| {
        format!("Failed to write corpus to {}", config.output.path.display())
    })?;

    let stats = corpus.stats();
    println!();
    println!("Crawl complete");
    println!("  Discovered: {}", stats.discovered);
    println!("  Scraped:    {}", stats.succeeded);
    println!("  Failed:     {} ({:.1}%)", stats.failed, stats.error_rate());
    println!("  Duration:   {}s", stats.duration_secs());
    println!("  Saved to:   {}", config.output.path.display());

    Ok(())
}
