//! Delimited-file loader for annotation datasets.
//!
//! The first row is the header. Every cell is read as text; cells equal to
//! one of the configured missing-value markers become `None`:
//! ```csv
//! id,full_text
//! 1,Had my first seizure today
//! 2,NaN
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use csv::ReaderBuilder;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::collection::{AnnotationCollection, Header};
use crate::error::{AnexError, Result};

/// Markers read as missing values, matching the usual dataframe defaults.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: &str = "\u{feff}";

/// Text encoding of a dataset file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// UTF-8; invalid sequences are an error
    #[default]
    Utf8,
    /// UTF-8; invalid sequences are replaced with U+FFFD
    Utf8Lossy,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
}

impl Encoding {
    /// Decode raw file contents.
    pub fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        let text = match self {
            Encoding::Utf8 => String::from_utf8(bytes)
                .map_err(|e| AnexError::encoding(format!("invalid UTF-8 input: {e}")))?,
            Encoding::Utf8Lossy => String::from_utf8_lossy(&bytes).into_owned(),
            Encoding::Latin1 => bytes.into_iter().map(char::from).collect(),
        };

        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf8Lossy => "utf8-lossy",
            Encoding::Latin1 => "latin1",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Encoding {
    type Err = AnexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "utf8-lossy" | "utf-8-lossy" => Ok(Encoding::Utf8Lossy),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(Encoding::Latin1),
            other => Err(AnexError::encoding(format!("unsupported encoding '{other}'"))),
        }
    }
}

/// Options for reading a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Column holding the annotation text
    pub text_column: String,
    /// File encoding
    pub encoding: Encoding,
    /// Field delimiter
    pub delimiter: u8,
    /// Cell values treated as missing
    pub na_values: Vec<String>,
}

impl LoadOptions {
    /// Options for `text_column` with default encoding, delimiter and markers.
    pub fn new<S: Into<String>>(text_column: S) -> Self {
        LoadOptions {
            text_column: text_column.into(),
            encoding: Encoding::default(),
            delimiter: b',',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Set the encoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replace the missing-value markers.
    pub fn with_na_values(mut self, na_values: Vec<String>) -> Self {
        self.na_values = na_values;
        self
    }
}

/// Reads delimited annotation files into collections.
#[derive(Clone, Debug)]
pub struct CsvLoader {
    options: LoadOptions,
}

impl CsvLoader {
    /// Create a loader with the given options.
    pub fn new(options: LoadOptions) -> Self {
        CsvLoader { options }
    }

    /// The loader options.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load a dataset file.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<AnnotationCollection> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        let text = self.options.encoding.decode(bytes)?;
        let collection = self.parse(&text)?;

        debug!(
            "loaded {} rows from {} (text column '{}')",
            collection.len(),
            path.display(),
            collection.text_column()
        );
        Ok(collection)
    }

    /// Parse already decoded delimited text.
    pub fn parse(&self, text: &str) -> Result<AnnotationCollection> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .flexible(false)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
            return Err(AnexError::column("dataset header is empty"));
        }
        let header = Header::new(columns, &self.options.text_column)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let values: Vec<Option<String>> = record
                .iter()
                .map(|cell| {
                    if self.is_missing(cell) {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            rows.push(values);
        }

        AnnotationCollection::new(header, rows)
    }

    fn is_missing(&self, cell: &str) -> bool {
        self.options.na_values.iter().any(|na| na == cell)
    }
}

/// Load `path` with default options for `text_column` and `encoding`.
pub fn load<P: AsRef<Path>>(
    path: P,
    text_column: &str,
    encoding: Encoding,
) -> Result<AnnotationCollection> {
    CsvLoader::new(LoadOptions::new(text_column).with_encoding(encoding)).load(path)
}
