//! JSON rendering of scrape results
//!
//! Prices are rendered in major currency units and page sizes as
//! human-readable strings. Keys are emitted in alphabetical order.

use crate::output::size::format_signed_bytes;
use crate::product::{Product, ResultSet};
use crate::ScrapeError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::ser::PrettyFormatter;
use std::io::Write;

/// Converts minor currency units to major units for display
fn major_units(minor: i64) -> f64 {
    minor as f64 / 100.0
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Product", 4)?;
        state.serialize_field("description", self.description())?;
        state.serialize_field("size", &format_signed_bytes(self.raw_size()))?;
        state.serialize_field("title", self.title())?;
        state.serialize_field("unit_price", &major_units(self.unit_price()))?;
        state.end()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResultSet", 2)?;
        state.serialize_field("results", self.products())?;
        state.serialize_field("total", &major_units(self.total()))?;
        state.end()
    }
}

/// Writes the result set as JSON
///
/// # Arguments
///
/// * `writer` - Destination for the JSON text
/// * `results` - The result set to render
/// * `indent` - Spaces per indentation level, or `None` for a single line
pub fn write_json<W: Write>(
    writer: W,
    results: &ResultSet,
    indent: Option<usize>,
) -> Result<(), ScrapeError> {
    match indent {
        None => serde_json::to_writer(writer, results)?,
        Some(width) => {
            let indent = vec![b' '; width];
            let formatter = PrettyFormatter::with_indent(&indent);
            let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
            results.serialize(&mut serializer)?;
        }
    }
    Ok(())
}

/// Renders the result set as a JSON string
pub fn render_json(results: &ResultSet, indent: Option<usize>) -> Result<String, ScrapeError> {
    let mut buffer = Vec::new();
    write_json(&mut buffer, results, indent)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
