//! CSV export

use crate::output::traits::{Exporter, OutputResult};
use crate::record::ProductRecord;
use std::path::{Path, PathBuf};

/// Writes records as comma-separated rows under a `name,description,price` header
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Exporter for CsvExporter {
    fn path(&self) -> &Path {
        &self.path
    }

    fn export(&self, records: &[ProductRecord]) -> OutputResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        writer.write_record(ProductRecord::FIELDS)?;
        for record in records {
            writer.write_record(record.values())?;
        }
        writer.flush()?;

        tracing::debug!("Wrote {} CSV rows to {}", records.len(), self.path.display());
        Ok(())
    }
}
