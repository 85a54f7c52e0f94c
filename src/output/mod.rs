//! Output module for presenting scrape results
//!
//! This module handles:
//! - Rendering result sets as JSON (prices in major units)
//! - Formatting page sizes as human-readable strings

mod json;
mod size;

pub use json::{render_json, write_json};
pub use size::{format_bytes, format_signed_bytes};
