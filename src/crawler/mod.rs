//! Crawler module for the two-stage scrape pipeline
//!
//! This module contains:
//! - The fetcher capability and its HTTP and static implementations
//! - HTML parsing and the structural field extraction rules
//! - The discovery stage (seed pages to product URLs)
//! - The extraction stage (product URLs to product records)
//! - The scraper that runs both stages and aggregates the results

mod discovery;
mod extraction;
mod fetcher;
mod parser;
mod scrape;
mod stage;

pub use discovery::{discover, Discovered};
pub use extraction::{extract, Extracted};
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher, StaticFetcher};
pub use parser::{extract_product, extract_product_links, parse_document, parse_unit_price};
pub use scrape::{ScrapeReport, ScrapeStats, Scraper};
pub use stage::StageOutcome;
