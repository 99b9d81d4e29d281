//! Pattern matching over annotation text.
//!
//! This module provides the inclusion/exclusion filters applied to an
//! annotation collection:
//!
//! - [`pattern::Pattern`] - A compiled search pattern
//! - [`exclusion`] - Whole-word exclusion patterns built from chosen tokens
//! - [`filter`] - Include/exclude passes and the two-stage pipeline

pub mod exclusion;
pub mod filter;
pub mod pattern;

pub use exclusion::*;
pub use filter::*;
pub use pattern::*;
