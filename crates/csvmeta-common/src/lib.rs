//! csvmeta Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging setup, and error handling for the csvmeta workspace.
//!
//! # Overview
//!
//! - **Error Handling**: the [`IngestError`] taxonomy and its result alias
//! - **Types**: the persisted [`MetadataRecord`](types::MetadataRecord)
//! - **Logging**: `tracing` subscriber configuration
//!
//! # Example
//!
//! ```no_run
//! use csvmeta_common::types::{MetadataRecord, TableSummary};
//!
//! let summary = TableSummary {
//!     column_names: vec!["a".into(), "b".into()],
//!     row_count: 10,
//! };
//! let record = MetadataRecord::new("sales.csv", 512, summary, 1_700_000_000);
//! assert_eq!(record.column_count, 2);
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{IngestError, Result};
pub use types::{MetadataRecord, TableSummary};
