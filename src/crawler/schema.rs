//! Page schema: where things live in a listing page's markup
//!
//! Pagination discovery and record extraction only walk the document; every
//! structural marker they need comes from a `PageSchema`. Scraping a site with
//! different markup means writing one new schema.

use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Selector};

/// Where a field's value is read from once its element is found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// Value of the named attribute, as-is
    Attribute(&'static str),
    /// All descendant text, trimmed
    Text,
}

/// Lookup rule for one field inside a containing element
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Field name used in error messages
    pub field: &'static str,
    /// CSS selector text, kept for error messages
    pub css: &'static str,
    pub selector: Selector,
    pub source: FieldSource,
}

impl FieldRule {
    pub fn new(field: &'static str, css: &'static str, source: FieldSource) -> ExtractResult<Self> {
        Ok(Self {
            field,
            css,
            selector: compile(css)?,
            source,
        })
    }

    /// Reads the field from the first matching descendant of `block`
    pub fn read(&self, block: ElementRef<'_>) -> ExtractResult<String> {
        let element = block
            .select(&self.selector)
            .next()
            .ok_or_else(|| ExtractError::MissingElement {
                field: self.field.to_string(),
                selector: self.css.to_string(),
            })?;

        self.value_of(element)
    }

    /// Reads the field from every matching descendant of `scope`, in document order
    pub fn read_all(&self, scope: ElementRef<'_>) -> ExtractResult<Vec<String>> {
        scope
            .select(&self.selector)
            .map(|element| self.value_of(element))
            .collect()
    }

    fn value_of(&self, element: ElementRef<'_>) -> ExtractResult<String> {
        match self.source {
            FieldSource::Attribute(name) => element
                .value()
                .attr(name)
                .map(str::to_string)
                .ok_or_else(|| ExtractError::MissingAttribute {
                    field: self.field.to_string(),
                    attribute: name.to_string(),
                }),
            FieldSource::Text => Ok(element.text().collect::<String>().trim().to_string()),
        }
    }
}

/// Structural markers of one target site's listing pages
pub trait PageSchema: Send + Sync {
    /// The pagination container; only the first match is used
    fn pagination(&self) -> &Selector;

    /// Page links inside the pagination container, read as site-relative paths
    fn page_link(&self) -> &FieldRule;

    /// One product block per match
    fn product_block(&self) -> &Selector;

    fn name(&self) -> &FieldRule;

    fn description(&self) -> &FieldRule;

    fn price(&self) -> &FieldRule;
}

/// Schema of the e-commerce test site's static listings
#[derive(Debug, Clone)]
pub struct EcommerceSchema {
    pagination: Selector,
    page_link: FieldRule,
    product_block: Selector,
    name: FieldRule,
    description: FieldRule,
    price: FieldRule,
}

impl EcommerceSchema {
    pub fn new() -> ExtractResult<Self> {
        Ok(Self {
            pagination: compile("ul.pagination")?,
            page_link: FieldRule::new(
                "page link",
                "a.page-link",
                FieldSource::Attribute("href"),
            )?,
            product_block: compile("div.card-body")?,
            name: FieldRule::new("name", "a.title", FieldSource::Attribute("title"))?,
            description: FieldRule::new(
                "description",
                "p.description.card-text",
                FieldSource::Text,
            )?,
            price: FieldRule::new("price", "h4.price", FieldSource::Text)?,
        })
    }
}

impl PageSchema for EcommerceSchema {
    fn pagination(&self) -> &Selector {
        &self.pagination
    }

    fn page_link(&self) -> &FieldRule {
        &self.page_link
    }

    fn product_block(&self) -> &Selector {
        &self.product_block
    }

    fn name(&self) -> &FieldRule {
        &self.name
    }

    fn description(&self) -> &FieldRule {
        &self.description
    }

    fn price(&self) -> &FieldRule {
        &self.price
    }
}

/// Compiles a CSS selector, mapping failures to `ExtractError::Selector`
pub fn compile(css: &str) -> ExtractResult<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}
