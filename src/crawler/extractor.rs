//! Product record extraction

use crate::crawler::schema::PageSchema;
use crate::record::ProductRecord;
use crate::ExtractResult;
use scraper::Html;

/// Extracts one record per product block, in document order
///
/// A page with no product blocks yields an empty list. A block missing any
/// of its three fields fails the whole page; nothing is skipped.
///
/// # Example
///
/// ```
/// use listing_scraper::crawler::{extract_records, EcommerceSchema};
///
/// let html = r#"<div class="card-body">
///     <h4 class="price"> $999 </h4>
///     <a class="title" title="ThinkPad X1">ThinkPad X1</a>
///     <p class="description card-text"> Fast laptop </p>
/// </div>"#;
/// let schema = EcommerceSchema::new().unwrap();
/// let records = extract_records(html, &schema).unwrap();
/// assert_eq!(records[0].price, "$999");
/// ```
pub fn extract_records(html: &str, schema: &dyn PageSchema) -> ExtractResult<Vec<ProductRecord>> {
    let document = Html::parse_document(html);

    document
        .select(schema.product_block())
        .map(|block| -> ExtractResult<ProductRecord> {
            let record = ProductRecord {
                name: schema.name().read(block)?,
                description: schema.description().read(block)?,
                price: schema.price().read(block)?,
            };
            tracing::trace!("Extracted record: {:?}", record);
            Ok(record)
        })
        .collect()
}
