//! Lookup of misspelling candidates for a single word.

use std::cmp::Reverse;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::collection::AnnotationCollection;
use crate::spelling::levenshtein::{distance_bound, levenshtein_distance_threshold};
use crate::spelling::vocabulary::Vocabulary;

/// Default upper bound (exclusive) on the character length of a looked-up word.
pub const DEFAULT_CHARACTERS_LIMIT: usize = 30;

/// Source of misspelling candidates.
///
/// An empty result means no candidate was found; it is not an error.
pub trait MisspellingLookup {
    /// Candidate misspellings or variants of `word` found in the corpus.
    fn find_misspelled_candidates(&self, word: &str) -> Vec<String>;
}

/// Configuration for the corpus lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Maximum edit distance for candidates.
    pub max_distance: usize,
    /// Maximum number of candidates to return.
    pub max_candidates: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            max_distance: 3,
            max_candidates: 20,
        }
    }
}

/// Misspelling lookup against the vocabulary of an annotation collection.
///
/// Candidates are the vocabulary words within a length-dependent edit
/// distance of the query, closest first, then most frequent.
#[derive(Debug, Clone)]
pub struct CorpusLookup {
    vocabulary: Vocabulary,
    config: LookupConfig,
}

impl CorpusLookup {
    /// Create a lookup over an existing vocabulary.
    pub fn new(vocabulary: Vocabulary, config: LookupConfig) -> Self {
        CorpusLookup { vocabulary, config }
    }

    /// Build the vocabulary of `collection` and create a lookup over it.
    pub fn from_collection(collection: &AnnotationCollection, config: LookupConfig) -> Self {
        Self::new(Vocabulary::from_collection(collection), config)
    }

    /// The underlying vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl MisspellingLookup for CorpusLookup {
    fn find_misspelled_candidates(&self, word: &str) -> Vec<String> {
        let query = word.to_lowercase();
        let threshold = distance_bound(query.chars().count(), self.config.max_distance);

        let mut candidates: Vec<(usize, u32, &str)> = self
            .vocabulary
            .iter()
            .filter(|(candidate, _)| *candidate != query)
            .filter_map(|(candidate, frequency)| {
                levenshtein_distance_threshold(&query, candidate, threshold)
                    .map(|distance| (distance, frequency, candidate))
            })
            .collect();

        candidates.sort_by_key(|&(distance, frequency, candidate)| {
            (distance, Reverse(frequency), candidate)
        });
        candidates.truncate(self.config.max_candidates);

        debug!(
            "{} misspelling candidates for '{}' (distance <= {})",
            candidates.len(),
            word,
            threshold
        );
        candidates
            .into_iter()
            .map(|(_, _, candidate)| candidate.to_string())
            .collect()
    }
}

/// Outcome of validating the text typed into the word lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupInput {
    /// Nothing was typed
    Empty,
    /// The first word is accepted for lookup
    Accepted {
        word: String,
        /// Words typed after the first one, which are ignored
        ignored_words: usize,
    },
    /// The first word reaches the character limit; no lookup is done
    TooLong {
        word: String,
        limit: usize,
        ignored_words: usize,
    },
}

impl LookupInput {
    /// Whether more than one word was typed.
    pub fn has_ignored_words(&self) -> bool {
        match self {
            LookupInput::Empty => false,
            LookupInput::Accepted { ignored_words, .. }
            | LookupInput::TooLong { ignored_words, .. } => *ignored_words > 0,
        }
    }
}

/// Validate lookup input: keep only the first space-separated word and
/// refuse words of `limit` characters or more.
pub fn validate_lookup_input(input: &str, limit: usize) -> LookupInput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return LookupInput::Empty;
    }

    let mut words = trimmed.split(' ');
    let word = words.next().unwrap_or_default().to_string();
    let ignored_words = words.count();

    if word.chars().count() < limit {
        LookupInput::Accepted {
            word,
            ignored_words,
        }
    } else {
        LookupInput::TooLong {
            word,
            limit,
            ignored_words,
        }
    }
}

/// Validated input together with the candidates found, if a lookup ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResponse {
    pub input: LookupInput,
    pub candidates: Option<Vec<String>>,
}

/// Validate `input` and run `lookup` on the accepted word.
pub fn lookup_word<L: MisspellingLookup + ?Sized>(
    lookup: &L,
    input: &str,
    limit: usize,
) -> LookupResponse {
    let input = validate_lookup_input(input, limit);
    let candidates = match &input {
        LookupInput::Accepted { word, .. } => Some(lookup.find_misspelled_candidates(word)),
        LookupInput::Empty | LookupInput::TooLong { .. } => None,
    };
    LookupResponse { input, candidates }
}
