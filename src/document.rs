//! Annotation records and collections.
//!
//! A dataset is loaded once from a delimited file into an
//! [`collection::AnnotationCollection`], cleaned, and then narrowed by the
//! filters in [`crate::query`]. Collections are never mutated in place.

pub mod clean;
pub mod collection;
pub mod export;
pub mod loader;
pub mod record;
