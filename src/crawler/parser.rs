//! HTML parsing and field extraction
//!
//! This module turns fetched bytes into a queryable document and applies
//! the fixed structural rules of the catalog markup:
//! - product links sit two element levels below each `.productInfo`
//! - the title is the `h1` of the first `.productTitleDescriptionContainer`
//! - the description is the first `p` of the first `.productText`
//! - the unit price is the numeric part of `.pricePerUnit`

use crate::product::Product;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

const PRODUCT_INFO: &str = ".productInfo";
const TITLE_CONTAINER: &str = ".productTitleDescriptionContainer";
const PRODUCT_TEXT: &str = ".productText";
const PRICE_PER_UNIT: &str = ".pricePerUnit";

/// Parses a response body as an HTML document
///
/// Parsing is lenient: bytes that are not valid UTF-8 are replaced with
/// U+FFFD rather than rejecting the page, so a stray Latin-1 `£` does not
/// cost the whole document.
pub fn parse_document(body: &[u8]) -> Html {
    Html::parse_document(&String::from_utf8_lossy(body))
}

/// Extracts candidate product URLs from a listing page
///
/// For every `.productInfo` element, looks exactly two element levels down
/// for `href` attributes. Markup with a different nesting yields no links.
/// Relative targets are resolved against `page_url` when possible. Empty
/// and fragment-only targets, and targets that point back at `page_url`
/// itself, are skipped.
///
/// # Example
///
/// ```
/// use product_scraper::crawler::{extract_product_links, parse_document};
///
/// let html = r#"<div class="productInfo"><h3><a href="/p/kiwi.html">Kiwi</a></h3></div>"#;
/// let document = parse_document(html.as_bytes());
/// let links = extract_product_links(&document, "https://shop.test/index.html");
/// assert_eq!(links, vec!["https://shop.test/p/kiwi.html".to_string()]);
/// ```
pub fn extract_product_links(document: &Html, page_url: &str) -> Vec<String> {
    let Some(info_selector) = selector(PRODUCT_INFO) else {
        return Vec::new();
    };
    let base_url = Url::parse(page_url).ok();

    let mut links = Vec::new();
    for info in document.select(&info_selector) {
        for child in info.children().filter_map(ElementRef::wrap) {
            for grandchild in child.children().filter_map(ElementRef::wrap) {
                let href = grandchild.value().attr("href");
                if let Some(link) = href.and_then(|href| resolve_link(href, base_url.as_ref())) {
                    links.push(link);
                }
            }
        }
    }

    links
}

/// Resolves a link target against the page URL
///
/// Falls back to the raw value when either side does not parse. Returns
/// `None` for links that would only lead back to the page they were found on.
fn resolve_link(href: &str, base_url: Option<&Url>) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let Some(base) = base_url else {
        return Some(href.to_string());
    };
    let Ok(mut resolved) = base.join(href) else {
        return Some(href.to_string());
    };

    resolved.set_fragment(None);
    let mut page = base.clone();
    page.set_fragment(None);
    if resolved == page {
        return None;
    }

    Some(resolved.to_string())
}

/// Extracts a product record from a product page
///
/// Missing elements produce empty text rather than an error, and a price
/// that cannot be read becomes zero.
///
/// # Arguments
///
/// * `document` - The parsed product page
/// * `size` - Page size reported by the fetcher
pub fn extract_product(document: &Html, size: i64) -> Product {
    let title = first_within(document, TITLE_CONTAINER, "h1").unwrap_or_default();
    let description = first_within(document, PRODUCT_TEXT, "p").unwrap_or_default();
    let price_text = all_text(document, PRICE_PER_UNIT);

    Product::new(title, description, parse_unit_price(&price_text), size)
}

/// Converts price text such as `"£1.80/unit"` to minor units (`180`)
///
/// The first `digits.dd` match is used; anything without one yields `0`.
pub fn parse_unit_price(text: &str) -> i64 {
    static PRICE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(pattern) = PRICE
        .get_or_init(|| Regex::new(r"(\d*)\.(\d{2})").ok())
        .as_ref()
    else {
        return 0;
    };

    let Some(captures) = pattern.captures(text) else {
        return 0;
    };

    let major = match &captures[1] {
        "" => Some(0),
        digits => digits.parse::<i64>().ok(),
    };
    let minor = captures[2].parse::<i64>().ok();

    match (major, minor) {
        (Some(major), Some(minor)) => major
            .checked_mul(100)
            .and_then(|pence| pence.checked_add(minor))
            .unwrap_or(0),
        _ => 0,
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Text of the first `inner` element inside the first `outer` element
fn first_within(document: &Html, outer: &str, inner: &str) -> Option<String> {
    let outer_selector = selector(outer)?;
    let inner_selector = selector(inner)?;

    document
        .select(&outer_selector)
        .next()?
        .select(&inner_selector)
        .next()
        .map(element_text)
}

/// Concatenated text of every element matching `css`
fn all_text(document: &Html, css: &str) -> String {
    selector(css)
        .map(|sel| document.select(&sel).map(element_text).collect())
        .unwrap_or_default()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
