//! Output module for exporting scraped records
//!
//! This module handles:
//! - Flattening per-page batches into one record sequence
//! - Writing the CSV export
//! - Writing the JSON export

mod csv_output;
mod json_output;
mod traits;

pub use csv_output::CsvExporter;
pub use json_output::{to_json_string, JsonExporter};
pub use traits::{Exporter, OutputError, OutputResult};

use crate::config::OutputConfig;
use crate::record::{flatten, PageBatch};

/// Flattens the batches and writes the CSV export, then the JSON export
///
/// # Arguments
///
/// * `batches` - Per-page record batches in visitation order
/// * `config` - Output paths
///
/// # Returns
///
/// * `Ok(true)` - Both files were written
/// * `Ok(false)` - There were no records; no file was touched
/// * `Err(OutputError)` - A write failed
pub fn export_batches(batches: &[PageBatch], config: &OutputConfig) -> OutputResult<bool> {
    let exporters: [Box<dyn Exporter>; 2] = [
        Box::new(CsvExporter::new(&config.csv_path)),
        Box::new(JsonExporter::new(&config.json_path)),
    ];
    export_with(batches, &exporters)
}

/// Flattens the batches and runs each exporter in order
pub fn export_with(batches: &[PageBatch], exporters: &[Box<dyn Exporter>]) -> OutputResult<bool> {
    let records = flatten(batches);
    if records.is_empty() {
        tracing::info!("No records to export, skipping file writes");
        return Ok(false);
    }

    for exporter in exporters {
        exporter.export(&records)?;
        tracing::info!(
            "Exported {} records to {}",
            records.len(),
            exporter.path().display()
        );
    }

    Ok(true)
}
