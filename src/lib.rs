//! # anex
//!
//! Explore an annotation dataset, find mislabeled and misspelled
//! annotations, and export a cleaned subset.
//!
//! ## Pipeline
//!
//! - Load a CSV dataset once and share it through a [`cache::CollectionCache`]
//! - Drop records with a missing annotation and duplicated records
//! - Select records with an inclusion pattern
//! - Collect the single words and word sequences of the selection
//! - Exclude records containing chosen tokens
//! - Export what is left
//!
//! ```no_run
//! use anex::cache::CollectionCache;
//! use anex::config::AnexConfig;
//! use anex::session::ExplorerSession;
//!
//! # fn main() -> anex::error::Result<()> {
//! let cache = CollectionCache::new();
//! let (mut session, _counts) =
//!     ExplorerSession::open(&cache, "tweets.csv", &AnexConfig::default())?;
//!
//! session.set_inclusion_pattern("seizure")?;
//! session.exclude_words(vec!["dog".to_string()])?;
//! session.export("tweets_filtered.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cache;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod query;
pub mod session;
pub mod spelling;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
