//! Product Scraper main entry point
//!
//! Scrapes the seed URLs given on the command line and prints the results
//! as JSON on standard output. Logs go to standard error.

use anyhow::Context;
use clap::Parser;
use product_scraper::config::{load_config_with_hash, Config};
use product_scraper::output::write_json;
use product_scraper::{HttpFetcher, Scraper};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Product Scraper: extract product records from catalog pages
///
/// Each seed URL should be a listing page linking to product pages. The
/// products found are printed as JSON along with their total unit price.
#[derive(Parser, Debug)]
#[command(name = "product-scraper")]
#[command(version)]
#[command(about = "Extract product records from catalog pages", long_about = None)]
struct Cli {
    /// Seed URLs to look for product links on
    #[arg(value_name = "SEED_URL")]
    seeds: Vec<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the JSON on a single line
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path).map_err(|e| {
                tracing::error!("Failed to load configuration: {}", e);
                e
            })?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.http)
        .context("failed to build HTTP client")?;
    let scraper = Scraper::new(fetcher);

    tracing::info!("Scraping {} seed URLs", cli.seeds.len());

    let report = match scraper.run(&cli.seeds).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Error when scraping: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        seeds = report.stats.seeds,
        seed_failures = report.stats.seed_failures,
        product_urls = report.stats.product_urls,
        product_failures = report.stats.product_failures,
        products = report.results.len(),
        "Scrape completed"
    );

    let indent = (!cli.compact).then_some(config.output.indent);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, &report.results, indent).context("failed to write results")?;
    writeln!(out)?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("product_scraper=info,warn"),
            1 => EnvFilter::new("product_scraper=debug,info"),
            2 => EnvFilter::new("product_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
