//! Product Scraper: a two-stage catalog crawler
//!
//! This crate discovers product pages linked from one or more seed pages,
//! extracts a structured [`Product`] from each, and aggregates them into a
//! [`ResultSet`] with a computed price total.

pub mod config;
pub mod crawler;
pub mod output;
pub mod product;

use thiserror::Error;

/// Main error type for scraping operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("IO error for {url}: {source}")]
    Io {
        url: String,
        source: std::io::Error,
    },

    #[error("No page available for {url}")]
    NotFound { url: String },

    #[error("Scrape task failed: {0}")]
    Task(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Fetcher, HttpFetcher, ScrapeReport, ScrapeStats, Scraper, StaticFetcher};
pub use product::{Product, ResultSet};
