//! Common types used across csvmeta

use serde::{Deserialize, Serialize};

/// Structural summary of a decoded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Header cells in file order
    pub column_names: Vec<String>,

    /// Number of data records, header excluded
    pub row_count: u64,
}

impl TableSummary {
    pub fn column_count(&self) -> u64 {
        self.column_names.len() as u64
    }
}

/// The metadata persisted for one uploaded file.
///
/// `filename` is the primary key; writing a record for a filename that
/// already exists replaces it.
///
/// # Examples
///
/// ```rust
/// use csvmeta_common::types::{MetadataRecord, TableSummary};
///
/// let summary = TableSummary {
///     column_names: vec!["id".into(), "amount".into()],
///     row_count: 3,
/// };
/// let record = MetadataRecord::new("reports/q1.csv", 42, summary, 1_700_000_000);
///
/// assert_eq!(record.column_count, 2);
/// assert_eq!(record.row_count, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Decoded object key
    pub filename: String,

    /// Unix seconds at which the record was computed
    pub upload_timestamp: i64,

    /// Object size reported by the storage layer
    pub file_size_bytes: i64,

    pub row_count: u64,

    pub column_count: u64,

    pub column_names: Vec<String>,
}

impl MetadataRecord {
    /// Build a record from a table summary. `column_count` always equals
    /// `column_names.len()`.
    pub fn new(
        filename: impl Into<String>,
        file_size_bytes: i64,
        summary: TableSummary,
        upload_timestamp: i64,
    ) -> Self {
        let column_count = summary.column_count();
        Self {
            filename: filename.into(),
            upload_timestamp,
            file_size_bytes,
            row_count: summary.row_count,
            column_count,
            column_names: summary.column_names,
        }
    }
}
