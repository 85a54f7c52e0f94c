//! Product records and the aggregated result set
//!
//! Prices are held in minor currency units (pence) so that totals are exact.

/// A single product extracted from a product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    title: String,
    description: String,
    unit_price: i64,
    size: i64,
}

impl Product {
    /// Creates a product record
    ///
    /// # Arguments
    ///
    /// * `title` - Product title
    /// * `description` - Product description
    /// * `unit_price` - Price in minor currency units
    /// * `size` - Byte size of the product page as reported by the fetcher;
    ///   may be negative when the transport did not know it
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        unit_price: i64,
        size: i64,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            unit_price,
            size,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit price in minor currency units
    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    /// Page size exactly as reported at the source boundary
    pub fn raw_size(&self) -> i64 {
        self.size
    }

    /// Page size in bytes, with negative values clamped to zero
    pub fn size(&self) -> u64 {
        u64::try_from(self.size).unwrap_or(0)
    }
}

/// The aggregated output of a scrape
///
/// Products are kept in the order the extraction stage completed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    products: Vec<Product>,
}

impl ResultSet {
    /// Builds a result set from the products collected by the extraction stage
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sum of every product's unit price, in minor currency units
    pub fn total(&self) -> i64 {
        self.products.iter().map(Product::unit_price).sum()
    }
}

impl From<Vec<Product>> for ResultSet {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}
