//! Delimited-file export of annotation collections.

use std::path::Path;

use csv::{Terminator, Writer, WriterBuilder};
use log::info;

use crate::document::collection::AnnotationCollection;
use crate::error::{AnexError, Result};

/// Suffix appended to the dataset name to form the default export file name.
pub const EXPORT_SUFFIX: &str = "_filtered.csv";

/// Default export file name for a dataset: `<basename>_filtered.csv`.
///
/// The base name is the file name up to its first `.`.
pub fn default_export_name<P: AsRef<Path>>(dataset: P) -> String {
    let file_name = dataset
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    format!("{stem}{EXPORT_SUFFIX}")
}

/// Writes collections as delimited text with a header row.
#[derive(Clone, Debug)]
pub struct CsvExporter {
    delimiter: u8,
    terminator: Terminator,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    /// Comma-delimited exporter using the platform line terminator.
    pub fn new() -> Self {
        let terminator = if cfg!(windows) {
            Terminator::CRLF
        } else {
            Terminator::Any(b'\n')
        };
        CsvExporter {
            delimiter: b',',
            terminator,
        }
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder.delimiter(self.delimiter).terminator(self.terminator);
        builder
    }

    /// Write `collection` to `destination`, replacing any existing file.
    ///
    /// Returns the number of records written (header excluded).
    pub fn export<P: AsRef<Path>>(
        &self,
        collection: &AnnotationCollection,
        destination: P,
    ) -> Result<usize> {
        let destination = destination.as_ref();
        let mut writer = self.builder().from_path(destination)?;
        let written = write_records(&mut writer, collection)?;
        writer.flush()?;

        info!("exported {} rows to {}", written, destination.display());
        Ok(written)
    }

    /// Render `collection` as delimited text.
    pub fn render(&self, collection: &AnnotationCollection) -> Result<String> {
        let mut writer = self.builder().from_writer(Vec::new());
        write_records(&mut writer, collection)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| AnexError::other(format!("failed to finish CSV output: {}", e.error())))?;

        String::from_utf8(bytes).map_err(|e| AnexError::encoding(e.to_string()))
    }
}

fn write_records<W: std::io::Write>(
    writer: &mut Writer<W>,
    collection: &AnnotationCollection,
) -> Result<usize> {
    writer.write_record(collection.columns())?;

    let mut written = 0;
    for record in collection.iter() {
        writer.write_record(record.values().iter().map(|v| v.as_deref().unwrap_or("")))?;
        written += 1;
    }
    Ok(written)
}
