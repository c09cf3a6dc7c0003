//! csvmeta Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Handles S3 upload notifications for CSV files: each object is downloaded,
//! summarized (row count, column names), and a metadata item keyed by the
//! filename is written to DynamoDB.
//!
//! # Pipeline
//!
//! - [`storage`]: object download and size lookup
//! - [`table`]: CSV decoding into a [`TableSummary`](csvmeta_common::TableSummary)
//! - [`metadata`]: record assembly
//! - [`persistence`]: record upsert
//! - [`processor`]: sequential, abort-on-first-error batch orchestration
//!
//! # Example
//!
//! ```no_run
//! use csvmeta_ingest::{
//!     config::IngestConfig,
//!     persistence::DynamoMetadataStore,
//!     processor::IngestProcessor,
//!     storage::S3ObjectStore,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::from_env()?;
//!     let sdk = aws_config::load_from_env().await;
//!
//!     let processor = IngestProcessor::new(
//!         Arc::new(S3ObjectStore::from_sdk_config(&sdk, &config.storage)),
//!         Arc::new(DynamoMetadataStore::from_sdk_config(&sdk, &config.persistence)),
//!         config.processor_config(),
//!     );
//!
//!     let result = processor.handle(serde_json::json!({ "Records": [] })).await;
//!     assert!(result.is_success());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod metadata;
pub mod notification;
pub mod persistence;
pub mod processor;
pub mod response;
pub mod scratch;
pub mod storage;
pub mod table;
