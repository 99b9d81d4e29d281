//! Text analysis for annotation records.
//!
//! Annotation texts are split into space-separated words; single words and
//! contiguous word sequences are collected from a selection and offered as
//! tokens to exclude.

pub mod collector;
pub mod token;
pub mod tokenizer;

pub use collector::*;
pub use token::*;
