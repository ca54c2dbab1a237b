//! Pagination link discovery
//!
//! Reads the pagination control of a listing page and turns each page link
//! into an absolute URL on the source page's origin.

use crate::crawler::schema::PageSchema;
use crate::{ExtractError, ExtractResult};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// `scheme://host[:port]` followed by a path
static ORIGIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://[\w.-]+(?::\d+)?)/.*").expect("hardcoded regex pattern is valid")
});

/// Extracts the `scheme://host[:port]` origin of an absolute URL
///
/// The URL must carry a path (at least `/`) after the host.
pub fn origin_of(url: &str) -> ExtractResult<&str> {
    ORIGIN_PATTERN
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|origin| origin.as_str())
        .ok_or_else(|| ExtractError::InvalidSourceUrl(url.to_string()))
}

/// Discovers the page URLs to visit for one run
///
/// # Behavior
///
/// - No pagination control on the page: returns an empty list. Callers treat
///   this as "nothing to scrape", not as a single-page listing.
/// - Otherwise: `source_url` first, then one URL per page link in document
///   order, each link's `href` appended to the source origin. Duplicates are
///   kept.
///
/// # Errors
///
/// * `ExtractError::InvalidSourceUrl` - `source_url` has no `scheme://host/` prefix
/// * `ExtractError::MissingAttribute` - a page link lacks the schema's link attribute
///
/// # Example
///
/// ```
/// use listing_scraper::crawler::{discover_links, EcommerceSchema};
///
/// let html = r#"<ul class="pagination"><li><a class="page-link" href="/shop?page=2">2</a></li></ul>"#;
/// let schema = EcommerceSchema::new().unwrap();
/// let links = discover_links(html, "https://example.com/shop", &schema).unwrap();
/// assert_eq!(links, vec!["https://example.com/shop", "https://example.com/shop?page=2"]);
/// ```
pub fn discover_links(
    html: &str,
    source_url: &str,
    schema: &dyn PageSchema,
) -> ExtractResult<Vec<String>> {
    let document = Html::parse_document(html);
    let origin = origin_of(source_url)?;

    let Some(pagination) = document.select(schema.pagination()).next() else {
        tracing::debug!("No pagination control on {}", source_url);
        return Ok(Vec::new());
    };

    let mut links = vec![source_url.to_string()];
    for href in schema.page_link().read_all(pagination)? {
        let link = format!("{}{}", origin, href);
        tracing::debug!("Discovered page link: {}", link);
        links.push(link);
    }

    Ok(links)
}
