//! Corpus vocabulary used by the misspelling lookup.

use ahash::AHashMap;

use crate::analysis::tokenizer::unigrams;
use crate::document::collection::AnnotationCollection;

/// Words of a corpus with their frequencies.
///
/// Words are lowercased and stripped of leading/trailing punctuation; only
/// purely alphabetic words of two characters or more are kept.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: AHashMap<String, u32>,
    total_count: u64,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the vocabulary of the annotation texts of `collection`.
    pub fn from_collection(collection: &AnnotationCollection) -> Self {
        let mut vocabulary = Vocabulary::new();
        for text in collection.texts().flatten() {
            vocabulary.add_text(text);
        }
        vocabulary
    }

    /// Add every word of `text`.
    pub fn add_text(&mut self, text: &str) {
        for word in unigrams(text) {
            if let Some(normalized) = normalize(word) {
                self.increment(normalized);
            }
        }
    }

    fn increment(&mut self, word: String) {
        *self.words.entry(word).or_insert(0) += 1;
        self.total_count += 1;
    }

    /// Check if a word exists in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    /// Get the frequency of a word.
    pub fn frequency(&self, word: &str) -> u32 {
        self.words.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    /// Iterate over `(word, frequency)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.words.iter().map(|(w, f)| (w.as_str(), *f))
    }

    /// Get the total number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get the total frequency count.
    pub fn total_frequency(&self) -> u64 {
        self.total_count
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Normalize a raw token into a vocabulary word.
pub fn normalize(token: &str) -> Option<String> {
    let word = token.trim_matches(|c: char| !c.is_alphanumeric());
    if word.chars().count() < 2 || !word.chars().all(char::is_alphabetic) {
        return None;
    }
    Some(word.to_lowercase())
}
