//! Ordered, immutable collections of annotation records.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::document::record::AnnotationRecord;
use crate::error::{AnexError, Result};

/// Column names of a dataset plus the position of the annotation text column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
    text_index: usize,
}

impl Header {
    /// Create a header, locating `text_column` among `columns`.
    pub fn new(columns: Vec<String>, text_column: &str) -> Result<Self> {
        let text_index = columns
            .iter()
            .position(|c| c == text_column)
            .ok_or_else(|| {
                AnexError::column(format!(
                    "text column '{}' not found (available: {})",
                    text_column,
                    columns.join(", ")
                ))
            })?;

        Ok(Header {
            columns,
            text_index,
        })
    }

    /// All column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of the text column.
    pub fn text_index(&self) -> usize {
        self.text_index
    }

    /// Name of the text column.
    pub fn text_column(&self) -> &str {
        &self.columns[self.text_index]
    }
}

/// An ordered sequence of annotation records sharing one header.
///
/// Records are reference counted: filtering produces a new collection that
/// shares record storage with its source, and neither is ever modified.
#[derive(Clone, Debug)]
pub struct AnnotationCollection {
    header: Arc<Header>,
    records: Vec<Arc<AnnotationRecord>>,
}

impl AnnotationCollection {
    /// Build a collection from raw rows.
    ///
    /// Row numbers are assigned in input order.
    pub fn new(header: Header, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let width = header.columns().len();
        let mut records = Vec::with_capacity(rows.len());

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(AnexError::invalid_argument(format!(
                    "row {} has {} fields, expected {}",
                    row,
                    values.len(),
                    width
                )));
            }
            records.push(Arc::new(AnnotationRecord::new(row, values)));
        }

        Ok(AnnotationCollection {
            header: Arc::new(header),
            records,
        })
    }

    /// Create a collection sharing this collection's header.
    fn derive(&self, records: Vec<Arc<AnnotationRecord>>) -> Self {
        AnnotationCollection {
            header: Arc::clone(&self.header),
            records,
        }
    }

    /// The dataset header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        self.header.columns()
    }

    /// Name of the text column.
    pub fn text_column(&self) -> &str {
        self.header.text_column()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&AnnotationRecord> {
        self.records.get(index).map(|r| r.as_ref())
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> impl Iterator<Item = &AnnotationRecord> {
        self.records.iter().map(|r| r.as_ref())
    }

    /// Annotation text of a record of this collection.
    pub fn text_of<'a>(&self, record: &'a AnnotationRecord) -> Option<&'a str> {
        record.value(self.header.text_index())
    }

    /// Iterate over the annotation texts, `None` for missing values.
    pub fn texts(&self) -> impl Iterator<Item = Option<&str>> {
        let index = self.header.text_index();
        self.records.iter().map(move |r| r.value(index))
    }

    /// Source row numbers of the records, in order.
    pub fn rows(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.row()).collect()
    }

    /// New collection holding the records for which `keep` returns true.
    pub fn retain_where<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&AnnotationRecord) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        self.derive(records)
    }

    /// A reproducible random sample of up to `amount` records, in source order.
    pub fn sample(&self, amount: usize, seed: u64) -> Self {
        let amount = amount.min(self.records.len());
        let mut rng = StdRng::seed_from_u64(seed);
        let mut picked = rand::seq::index::sample(&mut rng, self.records.len(), amount).into_vec();
        picked.sort_unstable();

        let records = picked
            .into_iter()
            .map(|i| Arc::clone(&self.records[i]))
            .collect();
        self.derive(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> AnnotationCollection {
        let header = Header::new(vec!["id".to_string(), "full_text".to_string()], "full_text")
            .unwrap();
        let rows = vec![
            vec![Some("1".to_string()), Some("first seizure".to_string())],
            vec![Some("2".to_string()), None],
            vec![Some("3".to_string()), Some("aura again".to_string())],
        ];
        AnnotationCollection::new(header, rows).unwrap()
    }

    #[test]
    fn test_header_text_column() {
        let header = Header::new(vec!["a".to_string(), "b".to_string()], "b").unwrap();
        assert_eq!(header.text_index(), 1);
        assert_eq!(header.text_column(), "b");

        let result = Header::new(vec!["a".to_string()], "text");
        assert!(matches!(result, Err(AnexError::Column(_))));
    }

    #[test]
    fn test_texts_and_rows() {
        let c = collection();
        assert_eq!(c.len(), 3);
        assert_eq!(
            c.texts().collect::<Vec<_>>(),
            vec![Some("first seizure"), None, Some("aura again")]
        );
        assert_eq!(c.rows(), vec![0, 1, 2]);
        assert_eq!(c.text_column(), "full_text");
    }

    #[test]
    fn test_retain_leaves_source_untouched() {
        let c = collection();
        let narrowed = c.retain_where(|r| r.row() != 1);

        assert_eq!(narrowed.rows(), vec![0, 2]);
        assert_eq!(c.len(), 3);
        assert_eq!(narrowed.columns(), c.columns());
    }

    #[test]
    fn test_row_width_checked() {
        let header = Header::new(vec!["full_text".to_string()], "full_text").unwrap();
        let rows = vec![vec![Some("a".to_string()), Some("b".to_string())]];
        assert!(AnnotationCollection::new(header, rows).is_err());
    }

    #[test]
    fn test_sample_is_reproducible() {
        let c = collection();
        let a = c.sample(2, 42);
        let b = c.sample(2, 42);

        assert_eq!(a.len(), 2);
        assert_eq!(a.rows(), b.rows());
        assert!(a.rows().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(c.sample(10, 42).len(), 3);
    }
}
