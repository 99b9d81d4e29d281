//! Compiled search patterns.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::{AnexError, Result};

/// A regular expression searched anywhere in an annotation's text.
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Arc<Regex>,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns a pattern error if `pattern` is empty or is not a valid
    /// regular expression.
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(AnexError::pattern("pattern is empty"));
        }
        let regex = Regex::new(pattern)
            .map_err(|e| AnexError::pattern(format!("invalid pattern '{pattern}': {e}")))?;

        Ok(Pattern {
            regex: Arc::new(regex),
        })
    }

    /// A pattern matching `text` literally.
    pub fn literal(text: &str) -> Result<Self> {
        Self::new(&regex::escape(text))
    }

    /// Whether the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
