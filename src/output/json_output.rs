//! JSON export

use crate::output::traits::{Exporter, OutputResult};
use crate::record::ProductRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const INDENT: &[u8] = b"    ";

/// Writes records as a pretty-printed JSON array
///
/// Indentation is four spaces and non-ASCII text is written literally.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Renders records exactly as `JsonExporter` writes them
pub fn to_json_string(records: &[ProductRecord]) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_json(&mut buffer, records)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_json<W: Write>(writer: W, records: &[ProductRecord]) -> OutputResult<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut serializer)?;
    Ok(())
}

impl Exporter for JsonExporter {
    fn path(&self) -> &Path {
        &self.path
    }

    fn export(&self, records: &[ProductRecord]) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        write_json(&mut writer, records)?;
        writer.flush()?;

        tracing::debug!("Wrote {} JSON objects to {}", records.len(), self.path.display());
        Ok(())
    }
}
