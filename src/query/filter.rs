//! Inclusion and exclusion passes over annotation collections.
//!
//! A filter keeps or drops records depending on whether their text field
//! matches a [`Pattern`]. Filtering never modifies its input; each pass
//! returns a new collection.
//!
//! The two passes are independent but always run in the same order: the
//! inclusion pattern narrows the dataset, and the exclusion pattern then
//! removes records from that narrowed set.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::collection::AnnotationCollection;
use crate::query::pattern::Pattern;

/// Whether matching records are kept or removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep records whose text matches
    Include,
    /// Keep records whose text does not match
    Exclude,
}

/// Apply `pattern` to the text field of every record of `collection`.
///
/// A record with a missing text value never matches.
pub fn filter(
    collection: &AnnotationCollection,
    pattern: &Pattern,
    mode: FilterMode,
) -> AnnotationCollection {
    let result = collection.retain_where(|record| {
        let matched = collection
            .text_of(record)
            .is_some_and(|text| pattern.is_match(text));
        match mode {
            FilterMode::Include => matched,
            FilterMode::Exclude => !matched,
        }
    });

    debug!(
        "{:?} '{}': {} of {} records kept",
        mode,
        pattern,
        result.len(),
        collection.len()
    );
    result
}

/// Record counts reported after filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    /// Records selected by the inclusion pattern
    pub selected: usize,
    /// Records left after the exclusion pass, if one ran
    pub remaining: Option<usize>,
}

impl FilterSummary {
    /// Size of the collection that would be exported.
    pub fn current(&self) -> usize {
        self.remaining.unwrap_or(self.selected)
    }

    /// Records removed by the exclusion pass.
    pub fn excluded(&self) -> usize {
        self.remaining.map_or(0, |r| self.selected - r)
    }
}

/// Result of running inclusion, then optionally exclusion.
#[derive(Clone, Debug)]
pub struct FilterOutcome {
    /// Records matching the inclusion pattern
    pub selected: AnnotationCollection,
    /// Selected records left after the exclusion pass
    pub remaining: Option<AnnotationCollection>,
}

impl FilterOutcome {
    /// The exclusion result when an exclusion ran, else the inclusion result.
    pub fn current(&self) -> &AnnotationCollection {
        self.remaining.as_ref().unwrap_or(&self.selected)
    }

    /// Record counts of this outcome.
    pub fn summary(&self) -> FilterSummary {
        FilterSummary {
            selected: self.selected.len(),
            remaining: self.remaining.as_ref().map(|r| r.len()),
        }
    }
}

/// Run the inclusion pass on `source`, then the exclusion pass on its result.
pub fn apply(
    source: &AnnotationCollection,
    inclusion: &Pattern,
    exclusion: Option<&Pattern>,
) -> FilterOutcome {
    let selected = filter(source, inclusion, FilterMode::Include);
    let remaining = exclusion.map(|pattern| filter(&selected, pattern, FilterMode::Exclude));

    FilterOutcome {
        selected,
        remaining,
    }
}
