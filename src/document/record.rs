//! A single annotation row.

use serde::{Deserialize, Serialize};

/// One row of an annotation dataset.
///
/// Every cell is kept as an optional string; `None` marks a missing value.
/// The source row number identifies the record across filtered views of the
/// same dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Row number in the source file (0-based, header excluded)
    row: usize,
    /// Cell values in column order
    values: Vec<Option<String>>,
}

impl AnnotationRecord {
    /// Create a new record.
    pub fn new(row: usize, values: Vec<Option<String>>) -> Self {
        AnnotationRecord { row, values }
    }

    /// Source row number.
    pub fn row(&self) -> usize {
        self.row
    }

    /// All cell values in column order.
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Value of the cell at `index`, `None` if missing or out of range.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
