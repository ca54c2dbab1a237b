//! Scraped record types
//!
//! A `ProductRecord` is one product card; a `PageBatch` is every record read
//! from a single listing page, in document order.

use serde::{Deserialize, Serialize};

/// One product scraped from a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Display title, taken from the title anchor's `title` attribute
    pub name: String,

    /// Trimmed description text
    pub description: String,

    /// Trimmed price text, currency symbol included
    pub price: String,
}

impl ProductRecord {
    /// Column order used by every exporter
    pub const FIELDS: [&'static str; 3] = ["name", "description", "price"];

    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
        }
    }

    /// Returns the field values in `FIELDS` order
    pub fn values(&self) -> [&str; 3] {
        [&self.name, &self.description, &self.price]
    }
}

/// Records extracted from one visited page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBatch {
    /// The URL the page was fetched from
    pub url: String,

    /// Records in document order
    pub records: Vec<ProductRecord>,
}

impl PageBatch {
    pub fn new(url: impl Into<String>, records: Vec<ProductRecord>) -> Self {
        Self {
            url: url.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Concatenates all batches into one sequence, batch order then page order
pub fn flatten(batches: &[PageBatch]) -> Vec<ProductRecord> {
    batches
        .iter()
        .flat_map(|batch| batch.records.iter().cloned())
        .collect()
}

/// Total number of records across all batches
pub fn total_records(batches: &[PageBatch]) -> usize {
    batches.iter().map(PageBatch::len).sum()
}
