//! Extraction stage: product URLs to product records

use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::crawler::parser::{extract_product, parse_document};
use crate::crawler::stage::{run_stage, StageOutcome};
use crate::product::Product;
use crate::ScrapeError;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Products produced by the extraction stage
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    /// Successfully extracted products, in completion order
    pub products: Vec<Product>,

    /// Product task counts
    pub outcome: StageOutcome,
}

/// Fetches every product URL concurrently and extracts one product from each
///
/// A URL that cannot be fetched contributes nothing; the number of
/// such failures is reported in the outcome.
pub async fn extract<I>(fetcher: &Arc<dyn Fetcher>, urls: I) -> Extracted
where
    I: IntoIterator<Item = String>,
{
    let mut products = Vec::new();

    let outcome = run_stage(
        "extraction",
        urls,
        |url, sender| {
            let span = tracing::debug_span!("extract", url = %url);
            scrape_product(Arc::clone(fetcher), url, sender).instrument(span)
        },
        |product: Product| {
            tracing::trace!(title = product.title(), "Scraped product info");
            products.push(product);
        },
    )
    .await;

    tracing::info!(
        product_urls = outcome.dispatched,
        failed = outcome.failed,
        products = products.len(),
        "Extraction finished"
    );

    Extracted { products, outcome }
}

/// Fetches one product page and emits the product found on it
async fn scrape_product(
    fetcher: Arc<dyn Fetcher>,
    url: String,
    sender: mpsc::Sender<Product>,
) -> Result<(), ScrapeError> {
    let page = fetcher.fetch(&url).await?;
    let product = product_from_page(&page);

    // The receiver lives until every task has completed
    let _ = sender.send(product).await;

    Ok(())
}

fn product_from_page(page: &FetchedPage) -> Product {
    extract_product(&parse_document(&page.body), page.content_length)
}
