//! Word n-gram tokenizer implementation.

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::{Tokenizer, unigrams};
use crate::error::{AnexError, Result};

/// Inclusive range of n-gram sizes, in words.
///
/// The default range `2..=3` (bigrams and trigrams) keeps candidate lists
/// short enough to pick from by hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramRange {
    /// Minimum n-gram size
    pub min: usize,
    /// Maximum n-gram size
    pub max: usize,
}

impl NgramRange {
    /// Create a validated n-gram range.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` is 0 or `max` is less than `min`.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        let range = NgramRange { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Check the range invariants (`1 <= min <= max`).
    pub fn validate(&self) -> Result<()> {
        if self.min == 0 {
            return Err(AnexError::analysis("n-gram min must be at least 1"));
        }
        if self.max < self.min {
            return Err(AnexError::analysis(format!(
                "n-gram max ({}) must be >= min ({})",
                self.max, self.min
            )));
        }
        Ok(())
    }

    /// Iterate over the sizes in the range.
    pub fn sizes(&self) -> std::ops::RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl Default for NgramRange {
    fn default() -> Self {
        NgramRange { min: 2, max: 3 }
    }
}

/// A tokenizer that generates contiguous word n-grams.
///
/// Tokens are emitted grouped by size, smallest first, each group in
/// left-to-right order.
///
/// # Examples
///
/// ```
/// use anex::analysis::tokenizer::ngram::WordNgramTokenizer;
/// use anex::analysis::tokenizer::Tokenizer;
///
/// let tokenizer = WordNgramTokenizer::new(2, 3).unwrap();
/// let tokens: Vec<_> = tokenizer.tokenize("a b c").unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(tokens, vec!["a b", "b c", "a b c"]);
/// ```
#[derive(Clone, Debug)]
pub struct WordNgramTokenizer {
    range: NgramRange,
}

impl WordNgramTokenizer {
    /// Create a new word n-gram tokenizer for sizes `min..=max`.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        Ok(Self::with_range(NgramRange::new(min, max)?))
    }

    /// Create a tokenizer from an already validated range.
    pub fn with_range(range: NgramRange) -> Self {
        WordNgramTokenizer { range }
    }

    /// Create a bigram tokenizer (n=2).
    pub fn bigram() -> Self {
        Self::with_range(NgramRange { min: 2, max: 2 })
    }

    /// Create a trigram tokenizer (n=3).
    pub fn trigram() -> Self {
        Self::with_range(NgramRange { min: 3, max: 3 })
    }

    /// The configured size range.
    pub fn range(&self) -> NgramRange {
        self.range
    }
}

impl Default for WordNgramTokenizer {
    fn default() -> Self {
        Self::with_range(NgramRange::default())
    }
}

impl Tokenizer for WordNgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let words = unigrams(text);
        let mut tokens = Vec::new();

        for n in self.range.sizes() {
            for (position, window) in words.windows(n).enumerate() {
                tokens.push(Token::new(window.join(" "), position, n));
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word_ngram"
    }
}
