//! The scrape operation: discovery, then extraction, then aggregation
//!
//! The two stages run strictly one after the other. Every task of a stage
//! is observed before the next stage starts, and the whole operation only
//! returns once both stages have drained.

use crate::crawler::discovery::discover;
use crate::crawler::extraction::extract;
use crate::crawler::fetcher::Fetcher;
use crate::product::ResultSet;
use crate::ScrapeError;
use std::sync::Arc;
use tracing::Instrument;

/// Task counts for a completed scrape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeStats {
    /// Seed URLs dispatched to discovery
    pub seeds: usize,

    /// Seeds that could not be fetched
    pub seed_failures: usize,

    /// Unique product URLs dispatched to extraction
    pub product_urls: usize,

    /// Product pages that could not be fetched
    pub product_failures: usize,
}

/// Result set together with the task counts that produced it
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    pub results: ResultSet,
    pub stats: ScrapeStats,
}

/// Scrapes product records reachable from seed pages
///
/// # Example
///
/// ```no_run
/// use product_scraper::{HttpFetcher, Scraper};
/// use product_scraper::config::{HttpConfig, UserAgentConfig};
///
/// # async fn run() -> product_scraper::Result<()> {
/// let fetcher = HttpFetcher::from_config(&UserAgentConfig::default(), &HttpConfig::default())?;
/// let scraper = Scraper::new(fetcher);
/// let results = scraper
///     .scrape(&["https://shop.example/ripe.html".to_string()])
///     .await?;
/// println!("{} products, total {}", results.len(), results.total());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Scraper {
    fetcher: Arc<dyn Fetcher>,
}

impl Scraper {
    pub fn new<F>(fetcher: F) -> Self
    where
        F: Fetcher + 'static,
    {
        Self::with_shared(Arc::new(fetcher))
    }

    /// Creates a scraper around an already shared fetcher
    pub fn with_shared(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Scrapes the seeds and returns the aggregated products
    ///
    /// Per-page failures are logged and skipped. An empty or entirely
    /// unreachable seed list yields an empty result set, not an error.
    pub async fn scrape(&self, seeds: &[String]) -> Result<ResultSet, ScrapeError> {
        Ok(self.run(seeds).await?.results)
    }

    /// Scrapes the seeds and returns the products along with task counts
    pub async fn run(&self, seeds: &[String]) -> Result<ScrapeReport, ScrapeError> {
        let span = tracing::info_span!("scrape", seeds = seeds.len());
        self.run_stages(seeds).instrument(span).await
    }

    async fn run_stages(&self, seeds: &[String]) -> Result<ScrapeReport, ScrapeError> {
        tracing::trace!("Started scraping");

        let discovered = discover(&self.fetcher, seeds).await;
        let extracted = extract(&self.fetcher, discovered.urls).await;

        let stats = ScrapeStats {
            seeds: discovered.outcome.dispatched,
            seed_failures: discovered.outcome.failed,
            product_urls: extracted.outcome.dispatched,
            product_failures: extracted.outcome.failed,
        };
        let results = ResultSet::new(extracted.products);

        tracing::trace!(products = results.len(), "Finished scraping");

        Ok(ScrapeReport { results, stats })
    }
}

impl std::fmt::Debug for Scraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scraper").finish_non_exhaustive()
    }
}
