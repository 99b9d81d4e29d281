//! Exploration session over one cleaned dataset.
//!
//! A session walks the pipeline in a fixed order:
//!
//! 1. an inclusion pattern selects the working subset,
//! 2. candidate tokens are collected from that subset,
//! 3. chosen tokens become an exclusion pattern applied to the subset,
//! 4. the current subset is exported.
//!
//! Every change recomputes the pipeline from the stage it affects. The
//! session owns its collection; nothing it derives is visible to other
//! sessions built from the same cached dataset.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;

use crate::analysis::collector::TokenCollector;
use crate::analysis::token::TokenSet;
use crate::analysis::tokenizer::ngram::NgramRange;
use crate::cache::CollectionCache;
use crate::config::AnexConfig;
use crate::document::clean::{CleanCounts, clean};
use crate::document::collection::AnnotationCollection;
use crate::document::export::CsvExporter;
use crate::error::{AnexError, Result};
use crate::query::exclusion::{TokenEscaping, build_exclusion_pattern};
use crate::query::filter::{FilterMode, FilterOutcome, FilterSummary, apply, filter};
use crate::query::pattern::Pattern;
use crate::spelling::lookup::{
    CorpusLookup, DEFAULT_CHARACTERS_LIMIT, LookupConfig, LookupResponse, MisspellingLookup,
    lookup_word,
};

/// Settings of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Word counts of the multi-word candidates.
    pub ngram_range: NgramRange,
    /// How excluded tokens are embedded in the exclusion pattern.
    pub token_escaping: TokenEscaping,
    /// Longest word accepted by misspelling lookup.
    pub characters_limit: usize,
    /// Field delimiter of the exported CSV.
    pub delimiter: u8,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            ngram_range: NgramRange::default(),
            token_escaping: TokenEscaping::default(),
            characters_limit: DEFAULT_CHARACTERS_LIMIT,
            delimiter: b',',
        }
    }
}

impl From<&AnexConfig> for SessionOptions {
    fn from(config: &AnexConfig) -> Self {
        SessionOptions {
            ngram_range: config.ngram_range,
            token_escaping: config.token_escaping,
            characters_limit: config.characters_limit,
            delimiter: config.delimiter_byte(),
        }
    }
}

/// Result of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// File the rows were written to.
    pub path: PathBuf,
    /// Data rows written, header excluded.
    pub rows: usize,
}

/// Interactive state for exploring one dataset.
#[derive(Debug, Clone)]
pub struct ExplorerSession {
    source: Arc<AnnotationCollection>,
    options: SessionOptions,
    collector: TokenCollector,
    inclusion: Option<Pattern>,
    outcome: Option<FilterOutcome>,
    excluded_words: Vec<String>,
    multi_word: bool,
    excluded_phrases: Vec<String>,
}

impl ExplorerSession {
    /// Create a session over an already cleaned collection.
    pub fn new(source: Arc<AnnotationCollection>, options: SessionOptions) -> Result<Self> {
        Ok(ExplorerSession {
            source,
            collector: TokenCollector::new(options.ngram_range)?,
            options,
            inclusion: None,
            outcome: None,
            excluded_words: Vec::new(),
            multi_word: false,
            excluded_phrases: Vec::new(),
        })
    }

    /// Load `path` through `cache`, clean it, and open a session on the result.
    ///
    /// Returns the session with the counts of the cleaning pass.
    pub fn open<P: AsRef<Path>>(
        cache: &CollectionCache,
        path: P,
        config: &AnexConfig,
    ) -> Result<(Self, CleanCounts)> {
        config.validate()?;
        let loaded = cache.get_or_load(path, &config.load_options())?;
        let report = clean(&loaded);
        let counts = report.counts(loaded.len());

        let session = Self::new(Arc::new(report.collection), SessionOptions::from(config))?;
        Ok((session, counts))
    }

    /// The cleaned dataset the session works on.
    pub fn source(&self) -> &AnnotationCollection {
        &self.source
    }

    /// Session settings.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Set the inclusion pattern and select the matching records.
    ///
    /// An empty pattern clears the selection. Changing the pattern discards
    /// the tokens chosen for the previous selection. On an invalid pattern
    /// the session is left unchanged.
    pub fn set_inclusion_pattern(&mut self, pattern: &str) -> Result<Option<FilterSummary>> {
        if pattern.is_empty() {
            self.clear_inclusion();
            return Ok(None);
        }
        if self.inclusion_pattern() == Some(pattern) {
            return Ok(self.summary());
        }

        let compiled = Pattern::new(pattern)?;
        self.outcome = Some(apply(&self.source, &compiled, None));
        self.inclusion = Some(compiled);
        self.excluded_words.clear();
        self.excluded_phrases.clear();

        let summary = self.summary();
        if let Some(summary) = &summary {
            info!("pattern '{}' selected {} records", pattern, summary.selected);
        }
        Ok(summary)
    }

    /// Drop the inclusion pattern and every derived selection.
    pub fn clear_inclusion(&mut self) {
        self.inclusion = None;
        self.outcome = None;
        self.excluded_words.clear();
        self.excluded_phrases.clear();
    }

    /// The current inclusion pattern.
    pub fn inclusion_pattern(&self) -> Option<&str> {
        self.inclusion.as_ref().map(Pattern::as_str)
    }

    /// Records selected by the inclusion pattern.
    pub fn selected(&self) -> Option<&AnnotationCollection> {
        self.outcome.as_ref().map(|o| &o.selected)
    }

    /// Selected records left after the exclusion pass, if tokens are chosen.
    pub fn remaining(&self) -> Option<&AnnotationCollection> {
        self.outcome.as_ref().and_then(|o| o.remaining.as_ref())
    }

    /// The collection an export would write.
    pub fn current(&self) -> Option<&AnnotationCollection> {
        self.outcome.as_ref().map(FilterOutcome::current)
    }

    /// Counts of the current selection.
    pub fn summary(&self) -> Option<FilterSummary> {
        self.outcome.as_ref().map(FilterOutcome::summary)
    }

    /// Single-word tokens of the selection, sorted.
    pub fn unigram_candidates(&self) -> Option<TokenSet> {
        self.selected().map(|s| self.collector.unigrams(s))
    }

    /// Whether multi-word tokens are offered.
    pub fn multi_word_enabled(&self) -> bool {
        self.multi_word
    }

    /// Turn multi-word filtering on or off.
    ///
    /// Turning it off discards the chosen multi-word tokens.
    pub fn set_multi_word(&mut self, enabled: bool) -> Result<()> {
        self.multi_word = enabled;
        if !enabled && !self.excluded_phrases.is_empty() {
            self.excluded_phrases.clear();
            self.refresh_exclusion()?;
        }
        Ok(())
    }

    /// Multi-word tokens of the selection, sorted; `None` when multi-word
    /// filtering is off or nothing is selected.
    pub fn ngram_candidates(&self) -> Result<Option<TokenSet>> {
        match self.selected() {
            Some(selected) if self.multi_word => Ok(Some(self.collector.ngrams(selected)?)),
            _ => Ok(None),
        }
    }

    /// Choose the single-word tokens to exclude.
    pub fn exclude_words(&mut self, words: Vec<String>) -> Result<Option<FilterSummary>> {
        self.require_selection("choosing tokens to exclude")?;
        let previous = std::mem::replace(&mut self.excluded_words, words);
        if let Err(e) = self.refresh_exclusion() {
            self.excluded_words = previous;
            return Err(e);
        }
        Ok(self.summary())
    }

    /// Choose the multi-word tokens to exclude.
    pub fn exclude_phrases(&mut self, phrases: Vec<String>) -> Result<Option<FilterSummary>> {
        self.require_selection("choosing word sequences to exclude")?;
        if !self.multi_word && !phrases.is_empty() {
            return Err(AnexError::precondition(
                "multi-word filtering must be enabled before choosing word sequences",
            ));
        }
        let previous = std::mem::replace(&mut self.excluded_phrases, phrases);
        if let Err(e) = self.refresh_exclusion() {
            self.excluded_phrases = previous;
            return Err(e);
        }
        Ok(self.summary())
    }

    /// All chosen tokens: single words first, then word sequences.
    pub fn tokens_to_remove(&self) -> Vec<String> {
        let phrases: &[String] = if self.multi_word {
            self.excluded_phrases.as_slice()
        } else {
            &[]
        };
        self.excluded_words
            .iter()
            .chain(phrases.iter())
            .cloned()
            .collect()
    }

    fn require_selection(&self, action: &str) -> Result<()> {
        if self.outcome.is_none() {
            return Err(AnexError::precondition(format!(
                "an inclusion pattern must be set before {action}"
            )));
        }
        Ok(())
    }

    fn refresh_exclusion(&mut self) -> Result<()> {
        let tokens = self.tokens_to_remove();
        let escaping = self.options.token_escaping;
        let Some(outcome) = self.outcome.as_mut() else {
            return Ok(());
        };

        outcome.remaining = if tokens.is_empty() {
            None
        } else {
            let pattern = build_exclusion_pattern(&tokens, escaping)?;
            Some(filter(&outcome.selected, &pattern, FilterMode::Exclude))
        };

        if let Some(remaining) = &outcome.remaining {
            debug!(
                "{} tokens excluded, {} of {} records remaining",
                tokens.len(),
                remaining.len(),
                outcome.selected.len()
            );
        }
        Ok(())
    }

    /// Export the current collection to `destination`, replacing any file there.
    ///
    /// # Errors
    ///
    /// Returns a precondition error, and writes nothing, when no inclusion
    /// pattern is set.
    pub fn export<P: AsRef<Path>>(&self, destination: P) -> Result<ExportReport> {
        let current = self.current().ok_or_else(|| {
            AnexError::precondition("you should filter on a selection before export")
        })?;
        let destination = destination.as_ref();

        let rows = CsvExporter::new()
            .with_delimiter(self.options.delimiter)
            .export(current, destination)?;

        Ok(ExportReport {
            path: destination.to_path_buf(),
            rows,
        })
    }

    /// Misspelling lookup over the vocabulary of the session's dataset.
    pub fn corpus_lookup(&self, config: LookupConfig) -> CorpusLookup {
        CorpusLookup::from_collection(&self.source, config)
    }

    /// Validate `input` with the session's character limit and look it up.
    pub fn lookup_word<L: MisspellingLookup + ?Sized>(
        &self,
        lookup: &L,
        input: &str,
    ) -> LookupResponse {
        lookup_word(lookup, input, self.options.characters_limit)
    }
}
