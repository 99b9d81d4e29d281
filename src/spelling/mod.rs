//! Misspelling lookup over the corpus vocabulary.
//!
//! This module provides a small lookup that, given one word, returns the
//! words of the dataset that are likely misspellings or variants of it.

pub mod levenshtein;
pub mod lookup;
pub mod vocabulary;

// Re-export commonly used types
pub use levenshtein::*;
pub use lookup::*;
pub use vocabulary::*;
