//! Single-space tokenizer implementation.

use super::{Tokenizer, unigrams};

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on the single space character.
///
/// Unlike `str::split_whitespace`, runs of spaces are not collapsed: each
/// extra space produces an empty token.
#[derive(Clone, Debug, Default)]
pub struct SpaceTokenizer;

impl SpaceTokenizer {
    /// Create a new space tokenizer.
    pub fn new() -> Self {
        SpaceTokenizer
    }
}

impl Tokenizer for SpaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = unigrams(text)
            .into_iter()
            .enumerate()
            .map(|(position, word)| Token::unigram(word, position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "space"
    }
}
