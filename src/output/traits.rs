//! Exporter trait and output errors

use crate::record::ProductRecord;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes a flattened record sequence to one file
pub trait Exporter {
    /// Destination file
    fn path(&self) -> &Path;

    /// Writes `records`, replacing any existing file
    fn export(&self, records: &[ProductRecord]) -> OutputResult<()>;
}
