//! Configuration module for the product scraper
//!
//! Configuration is optional. It only affects the HTTP transport and the
//! JSON renderer; the scrape pipeline itself takes no settings.
//!
//! # Example
//!
//! ```no_run
//! use product_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("User agent: {}", config.user_agent.header_value());
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, HttpConfig, OutputConfig, UserAgentConfig};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
