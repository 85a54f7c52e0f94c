//! Discovery stage: seed pages to a deduplicated set of product URLs

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{extract_product_links, parse_document};
use crate::crawler::stage::{run_stage, StageOutcome};
use crate::ScrapeError;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Product URLs found by the discovery stage
#[derive(Debug, Clone, Default)]
pub struct Discovered {
    /// Unique product page URLs
    pub urls: HashSet<String>,

    /// Seed task counts
    pub outcome: StageOutcome,
}

/// Fetches every seed concurrently and collects the product links they contain
///
/// A seed that cannot be fetched contributes no links. Links
/// found on several seeds appear once.
pub async fn discover(fetcher: &Arc<dyn Fetcher>, seeds: &[String]) -> Discovered {
    let mut urls = HashSet::new();

    let outcome = run_stage(
        "discovery",
        seeds.iter().cloned(),
        |seed, links| {
            let span = tracing::debug_span!("discover", url = %seed);
            scrape_links(Arc::clone(fetcher), seed, links).instrument(span)
        },
        |url| {
            tracing::trace!(url = %url, "Found product URL");
            urls.insert(url);
        },
    )
    .await;

    tracing::info!(
        seeds = outcome.dispatched,
        failed = outcome.failed,
        product_urls = urls.len(),
        "Discovery finished"
    );

    Discovered { urls, outcome }
}

/// Fetches one seed page and emits each product link it carries
async fn scrape_links(
    fetcher: Arc<dyn Fetcher>,
    url: String,
    links: mpsc::Sender<String>,
) -> Result<(), ScrapeError> {
    let page = fetcher.fetch(&url).await?;
    let found = links_from_body(&url, &page.body);

    tracing::debug!(links = found.len(), "Parsed seed page");

    for link in found {
        if links.send(link).await.is_err() {
            break;
        }
    }

    Ok(())
}

fn links_from_body(url: &str, body: &[u8]) -> Vec<String> {
    extract_product_links(&parse_document(body), url)
}
