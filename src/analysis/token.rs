//! Token types produced by the tokenizers.
//!
//! # Core Types
//!
//! - [`Token`] - A unigram or word n-gram with its position in the source text
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//! - [`TokenSet`] - Distinct tokens in lexicographic order
//!
//! # Examples
//!
//! ```
//! use anex::analysis::token::{Token, TokenSet};
//!
//! let token = Token::new("two words", 3, 2);
//! assert_eq!(token.text, "two words");
//! assert_eq!(token.words, 2);
//!
//! let set: TokenSet = ["b", "a", "b"].into_iter().collect();
//! assert_eq!(set.as_slice(), &["a".to_string(), "b".to_string()]);
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A token is one word, or a run of consecutive words joined by a single space.
///
/// Tokens keep the exact text found in the annotation: no case folding,
/// trimming or stemming is applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// Index of the first word of the token in the source text (0-based)
    pub position: usize,

    /// Number of words the token spans (1 for unigrams)
    pub words: usize,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(text: S, position: usize, words: usize) -> Self {
        Token {
            text: text.into(),
            position,
            words,
        }
    }

    /// Create a single-word token.
    pub fn unigram<S: Into<String>>(text: S, position: usize) -> Self {
        Self::new(text, position, 1)
    }

    /// Whether the token spans more than one word.
    pub fn is_multi_word(&self) -> bool {
        self.words > 1
    }

    /// Get the byte length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token text is empty (produced by consecutive spaces).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Type alias for a stream of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// A duplicate-free set of token texts, always in lexicographic order.
///
/// Ordering is byte-wise (`str` ordering), so the presentation order is the
/// same from one run to the next.
///
/// Serialized as a plain list; deserializing sorts and deduplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    /// Create an empty token set.
    pub fn new() -> Self {
        TokenSet { tokens: Vec::new() }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check membership.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens
            .binary_search_by(|entry| entry.as_str().cmp(token))
            .is_ok()
    }

    /// The sorted tokens.
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Consume the set, returning the sorted tokens.
    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let unique: BTreeSet<String> = iter.into_iter().map(Into::into).collect();
        TokenSet {
            tokens: unique.into_iter().collect(),
        }
    }
}

impl From<Vec<String>> for TokenSet {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<TokenSet> for Vec<String> {
    fn from(set: TokenSet) -> Self {
        set.tokens
    }
}

impl IntoIterator for TokenSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
