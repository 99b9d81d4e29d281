//! Tokenizer implementations for annotation text.
//!
//! Annotations are split on the single space character only. Nothing is
//! trimmed or case folded, and consecutive spaces yield empty words which
//! are kept as-is.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::SpaceTokenizer`] - Splits on `' '` into unigrams
//! - [`ngram::WordNgramTokenizer`] - Contiguous windows of `n` words
//!
//! # Examples
//!
//! ```
//! use anex::analysis::tokenizer::{ngrams, unigrams};
//!
//! assert_eq!(unigrams("a b c"), vec!["a", "b", "c"]);
//! assert_eq!(ngrams("a b c", 2), vec!["a b", "b c"]);
//! assert_eq!(ngrams("a b c", 3), vec!["a b c"]);
//! assert!(ngrams("a b c", 4).is_empty());
//! ```

pub mod ngram;
pub mod whitespace;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Separator used to split annotation text into words and to join n-grams.
pub const WORD_SEPARATOR: char = ' ';

/// Trait for tokenizers that convert annotation text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Split `text` on single spaces, returning every piece verbatim.
pub fn unigrams(text: &str) -> Vec<&str> {
    text.split(WORD_SEPARATOR).collect()
}

/// Every contiguous window of `n` space-separated words, joined by a single space.
///
/// Returns an empty vector when `n` is zero or when the text has fewer than
/// `n` words.
pub fn ngrams(text: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    let words = unigrams(text);
    words
        .windows(n)
        .map(|window| window.join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unigrams_verbatim() {
        assert_eq!(unigrams("Hello World"), vec!["Hello", "World"]);
        assert_eq!(unigrams(" lead"), vec!["", "lead"]);
        assert_eq!(unigrams("a  b"), vec!["a", "", "b"]);
        assert_eq!(unigrams(""), vec![""]);
    }

    #[test]
    fn test_unigrams_rejoin() {
        for text in ["one", "one two three", "tab\tinside word", "#tag @user"] {
            assert_eq!(unigrams(text).join(" "), text);
        }
    }

    #[test]
    fn test_ngrams_windows() {
        assert_eq!(ngrams("a b c", 1), vec!["a", "b", "c"]);
        assert_eq!(ngrams("a b c", 2), vec!["a b", "b c"]);
        assert_eq!(ngrams("a b c", 3), vec!["a b c"]);
    }

    #[test]
    fn test_ngrams_too_few_words() {
        assert!(ngrams("a b c", 4).is_empty());
        assert!(ngrams("single", 2).is_empty());
        assert!(ngrams("a b", 0).is_empty());
    }

    #[test]
    fn test_ngrams_keep_empty_words() {
        assert_eq!(ngrams("a  b", 2), vec!["a ", " b"]);
    }
}
