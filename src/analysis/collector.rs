//! Candidate token collection over an annotation collection.
//!
//! The collector tokenizes the text of every record and gathers the
//! distinct tokens into a sorted [`TokenSet`], ready to be offered for
//! selection as exclusion criteria.

use log::debug;

use crate::analysis::token::TokenSet;
use crate::analysis::tokenizer::ngram::{NgramRange, WordNgramTokenizer};
use crate::analysis::tokenizer::{Tokenizer, unigrams};
use crate::document::collection::AnnotationCollection;
use crate::error::Result;

/// Distinct single-word tokens of all record texts, sorted.
pub fn unigram_tokens(collection: &AnnotationCollection) -> TokenSet {
    let set: TokenSet = collection.texts().flatten().flat_map(unigrams).collect();
    debug!(
        "collected {} unigram tokens from {} records",
        set.len(),
        collection.len()
    );
    set
}

/// Distinct word n-grams for every size in `range`, sorted.
pub fn ngram_tokens(collection: &AnnotationCollection, range: NgramRange) -> Result<TokenSet> {
    range.validate()?;

    let set = collect_tokens(&WordNgramTokenizer::with_range(range), collection)?;
    debug!(
        "collected {} n-gram tokens (n = {}..={}) from {} records",
        set.len(),
        range.min,
        range.max,
        collection.len()
    );
    Ok(set)
}

/// Distinct tokens produced by `tokenizer` over every record text.
///
/// Records with a missing text contribute nothing.
pub fn collect_tokens<T: Tokenizer + ?Sized>(
    tokenizer: &T,
    collection: &AnnotationCollection,
) -> Result<TokenSet> {
    let mut texts = Vec::new();
    for text in collection.texts().flatten() {
        texts.extend(tokenizer.tokenize(text)?.map(|token| token.text));
    }
    Ok(texts.into_iter().collect())
}

/// Collects candidate tokens with a fixed n-gram range.
#[derive(Clone, Debug, Default)]
pub struct TokenCollector {
    phrases: WordNgramTokenizer,
}

impl TokenCollector {
    /// Create a collector for multi-word tokens of sizes in `range`.
    pub fn new(range: NgramRange) -> Result<Self> {
        range.validate()?;
        Ok(TokenCollector {
            phrases: WordNgramTokenizer::with_range(range),
        })
    }

    /// The configured n-gram range.
    pub fn range(&self) -> NgramRange {
        self.phrases.range()
    }

    /// Single-word candidates.
    pub fn unigrams(&self, collection: &AnnotationCollection) -> TokenSet {
        unigram_tokens(collection)
    }

    /// Multi-word candidates.
    pub fn ngrams(&self, collection: &AnnotationCollection) -> Result<TokenSet> {
        let set = collect_tokens(&self.phrases, collection)?;
        debug!(
            "collected {} n-gram tokens with {} from {} records",
            set.len(),
            self.phrases.name(),
            collection.len()
        );
        Ok(set)
    }
}
