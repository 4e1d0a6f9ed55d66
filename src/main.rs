use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medscrape::config::Config;
use medscrape::storage::OutputFormat;

mod commands;

#[derive(Parser)]
#[command(
    name = "medscrape",
    version,
    about = "Crawl a medical-condition index and extract one record per condition page",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl every condition page and save the corpus
    Crawl {
        /// Index page listing the conditions
        #[arg(long)]
        index_url: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (json, csv)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Process at most this many condition pages
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Fetch one condition page and print its record as JSON
    Extract {
        /// Condition page URL
        url: String,
    },

    /// Print the condition pages listed on the index
    Discover {
        /// Index page listing the conditions
        #[arg(long)]
        index_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;

    if let Some(log_format) = cli.log_format.clone() {
        config.logging.format = log_format;
    }
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Crawl {
            index_url,
            output,
            format,
            limit,
        } => {
            if let Some(index_url) = index_url {
                config.crawler.index_url = index_url;
            }
            if let Some(output) = output {
                config.output.path = output;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if limit.is_some() {
                config.crawler.limit = limit;
            }
            config.validate().context("Invalid configuration")?;
            commands::crawl(config).await?;
        }
        Commands::Extract { url } => {
            config.validate().context("Invalid configuration")?;
            commands::extract(config, url).await?;
        }
        Commands::Discover { index_url } => {
            if let Some(index_url) = index_url {
                config.crawler.index_url = index_url;
            }
            config.validate().context("Invalid configuration")?;
            commands::discover(config).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::from_env().context("Failed to load config from environment"),
    }
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("medscrape=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("medscrape={level},warn")))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        "text" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        other => anyhow::bail!("Unknown log format '{other}' (expected text or json)"),
    }

    Ok(())
}
