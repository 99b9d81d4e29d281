//! Configuration for anex.
//!
//! Every field has a default, so a configuration file only needs to list
//! the values it changes:
//!
//! ```json
//! {
//!   "text_column": "body",
//!   "ngram_range": { "min": 2, "max": 4 },
//!   "token_escaping": "raw"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::ngram::NgramRange;
use crate::document::loader::{DEFAULT_NA_VALUES, Encoding, LoadOptions};
use crate::error::{AnexError, Result};
use crate::query::exclusion::TokenEscaping;
use crate::spelling::lookup::{DEFAULT_CHARACTERS_LIMIT, LookupConfig};

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnexConfig {
    /// Column holding the annotation text.
    pub text_column: String,
    /// Dataset file encoding.
    pub encoding: Encoding,
    /// Field delimiter of the dataset and of exports.
    pub delimiter: char,
    /// Cell values read as missing.
    pub na_values: Vec<String>,
    /// Words looked up for misspellings must be shorter than this many characters.
    pub characters_limit: usize,
    /// Sizes of the multi-word tokens offered for exclusion.
    pub ngram_range: NgramRange,
    /// How chosen tokens are placed into the exclusion pattern.
    pub token_escaping: TokenEscaping,
    /// Misspelling lookup settings.
    pub lookup: LookupConfig,
    /// Number of rows shown as a dataset sample.
    pub sample_size: usize,
    /// Seed of the dataset sample.
    pub sample_seed: u64,
}

impl Default for AnexConfig {
    fn default() -> Self {
        AnexConfig {
            text_column: "full_text".to_string(),
            encoding: Encoding::Utf8,
            delimiter: ',',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            characters_limit: DEFAULT_CHARACTERS_LIMIT,
            ngram_range: NgramRange::default(),
            token_escaping: TokenEscaping::Literal,
            lookup: LookupConfig::default(),
            sample_size: 3,
            sample_seed: 42,
        }
    }
}

impl AnexConfig {
    /// Read a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AnexConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field invariants.
    pub fn validate(&self) -> Result<()> {
        if self.text_column.is_empty() {
            return Err(AnexError::config("text_column must not be empty"));
        }
        if !self.delimiter.is_ascii() {
            return Err(AnexError::config(format!(
                "delimiter must be a single-byte character, got '{}'",
                self.delimiter
            )));
        }
        if self.characters_limit == 0 {
            return Err(AnexError::config("characters_limit must be at least 1"));
        }
        self.ngram_range
            .validate()
            .map_err(|e| AnexError::config(e.to_string()))?;
        Ok(())
    }

    /// Delimiter as a byte, as expected by the CSV reader and writer.
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }

    /// Loader options derived from this configuration.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::new(self.text_column.clone())
            .with_encoding(self.encoding)
            .with_delimiter(self.delimiter_byte())
            .with_na_values(self.na_values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AnexConfig::default();
        assert_eq!(config.text_column, "full_text");
        assert_eq!(config.encoding, Encoding::Utf8);
        assert_eq!(config.characters_limit, 30);
        assert_eq!(config.ngram_range, NgramRange { min: 2, max: 3 });
        assert_eq!(config.token_escaping, TokenEscaping::Literal);
        assert_eq!(config.sample_size, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: AnexConfig = serde_json::from_str(
            r#"{"text_column": "body", "encoding": "latin1", "token_escaping": "raw",
                "ngram_range": {"min": 2, "max": 4}, "lookup": {"max_candidates": 5}}"#,
        )
        .unwrap();

        assert_eq!(config.text_column, "body");
        assert_eq!(config.encoding, Encoding::Latin1);
        assert_eq!(config.token_escaping, TokenEscaping::Raw);
        assert_eq!(config.ngram_range.max, 4);
        assert_eq!(config.lookup.max_candidates, 5);
        assert_eq!(config.lookup.max_distance, 3);
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AnexConfig {
            ngram_range: NgramRange { min: 0, max: 2 },
            ..AnexConfig::default()
        };
        assert!(matches!(config.validate(), Err(AnexError::Config(_))));

        let config = AnexConfig {
            delimiter: '§',
            ..AnexConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anex.json");
        std::fs::write(&path, r#"{"delimiter": ";", "sample_size": 5}"#).unwrap();

        let config = AnexConfig::from_file(&path).unwrap();
        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.sample_size, 5);
        assert_eq!(config.load_options().delimiter, b';');
    }
}
