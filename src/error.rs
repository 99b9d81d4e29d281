//! Error types for anex.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`AnexError`] enum.
//!
//! # Examples
//!
//! ```
//! use anex::error::{AnexError, Result};
//!
//! fn export_without_selection() -> Result<()> {
//!     Err(AnexError::precondition("no inclusion pattern set"))
//! }
//!
//! match export_without_selection() {
//!     Ok(_) => println!("Saved"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for anex operations.
#[derive(Error, Debug)]
pub enum AnexError {
    /// I/O errors (reading datasets, writing exports)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Analysis-related errors (tokenizer configuration, n-gram ranges)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Pattern construction errors
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Unknown or missing column
    #[error("Column error: {0}")]
    Column(String),

    /// Source text could not be decoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// An operation was attempted before its prerequisites were met
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with AnexError.
pub type Result<T> = std::result::Result<T, AnexError>;

impl AnexError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        AnexError::Analysis(msg.into())
    }

    /// Create a new pattern error.
    pub fn pattern<S: Into<String>>(msg: S) -> Self {
        AnexError::Pattern(msg.into())
    }

    /// Create a new column error.
    pub fn column<S: Into<String>>(msg: S) -> Self {
        AnexError::Column(msg.into())
    }

    /// Create a new encoding error.
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        AnexError::Encoding(msg.into())
    }

    /// Create a new precondition error.
    pub fn precondition<S: Into<String>>(msg: S) -> Self {
        AnexError::Precondition(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AnexError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        AnexError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        AnexError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Check whether this error is a refused precondition rather than a failure.
    pub fn is_precondition(&self) -> bool {
        matches!(self, AnexError::Precondition(_))
    }
}
