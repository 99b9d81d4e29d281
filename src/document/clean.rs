//! Removal of missing annotations and duplicate rows.

use ahash::AHashSet;
use log::info;
use serde::Serialize;

use crate::document::collection::AnnotationCollection;

/// Result of cleaning a collection.
#[derive(Clone, Debug)]
pub struct CleanReport {
    /// The cleaned collection
    pub collection: AnnotationCollection,
    /// Records dropped because their text was missing
    pub na_count: usize,
    /// Records dropped as exact duplicates of an earlier record
    pub duplicate_count: usize,
}

/// Counts of a cleaning pass, for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CleanCounts {
    pub rows_before: usize,
    pub rows_after: usize,
    pub na_count: usize,
    pub duplicate_count: usize,
}

impl CleanReport {
    /// Summary counts of this report.
    pub fn counts(&self, rows_before: usize) -> CleanCounts {
        CleanCounts {
            rows_before,
            rows_after: self.collection.len(),
            na_count: self.na_count,
            duplicate_count: self.duplicate_count,
        }
    }
}

/// Remove records with a missing text value, then exact duplicate records.
///
/// Two records are duplicates when every cell is equal. The first occurrence
/// is kept. The input collection is left unchanged.
pub fn clean(collection: &AnnotationCollection) -> CleanReport {
    let with_text = collection.retain_where(|r| collection.text_of(r).is_some());
    let na_count = collection.len() - with_text.len();

    let mut seen: AHashSet<&[Option<String>]> = AHashSet::with_capacity(with_text.len());
    let keep: Vec<bool> = with_text.iter().map(|r| seen.insert(r.values())).collect();
    let mut flags = keep.into_iter();
    let deduplicated = with_text.retain_where(|_| flags.next().unwrap_or(false));
    let duplicate_count = with_text.len() - deduplicated.len();

    info!(
        "cleaning removed {} missing annotations and {} duplicates ({} rows left)",
        na_count,
        duplicate_count,
        deduplicated.len()
    );

    CleanReport {
        collection: deduplicated,
        na_count,
        duplicate_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::collection::Header;

    fn row(id: &str, text: Option<&str>) -> Vec<Option<String>> {
        vec![Some(id.to_string()), text.map(|t| t.to_string())]
    }

    fn build(rows: Vec<Vec<Option<String>>>) -> AnnotationCollection {
        let header = Header::new(vec!["label".to_string(), "full_text".to_string()], "full_text")
            .unwrap();
        AnnotationCollection::new(header, rows).unwrap()
    }

    #[test]
    fn test_clean_counts() {
        let c = build(vec![
            row("a", Some("t1")),
            row("a", None),
            row("b", Some("t2")),
            row("c", Some("t3")),
            row("b", None),
            row("d", Some("t4")),
            row("b", Some("t2")),
            row("e", Some("t5")),
            row("f", Some("t6")),
            row("g", Some("t7")),
        ]);

        let report = clean(&c);
        assert_eq!(report.collection.len(), 7);
        assert_eq!(report.na_count, 2);
        assert_eq!(report.duplicate_count, 1);
        assert_eq!(c.len(), 10);
    }

    #[test]
    fn test_clean_keeps_first_duplicate() {
        let c = build(vec![
            row("x", Some("same")),
            row("x", Some("same")),
            row("x", Some("same")),
        ]);

        let report = clean(&c);
        assert_eq!(report.collection.rows(), vec![0]);
        assert_eq!(report.duplicate_count, 2);
    }

    #[test]
    fn test_same_text_other_columns_is_not_duplicate() {
        let c = build(vec![row("x", Some("same")), row("y", Some("same"))]);

        let report = clean(&c);
        assert_eq!(report.collection.len(), 2);
        assert_eq!(report.duplicate_count, 0);
    }

    #[test]
    fn test_clean_counts_summary() {
        let c = build(vec![row("x", None), row("y", Some("t"))]);
        let report = clean(&c);
        let counts = report.counts(c.len());

        assert_eq!(counts.rows_before, 2);
        assert_eq!(counts.rows_after, 1);
        assert_eq!(counts.na_count, 1);
    }
}
