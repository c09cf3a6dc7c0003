//! Batch orchestration
//!
//! Notifications are processed strictly in delivery order, one at a time.
//! The first error aborts the rest of the batch: items after the failing one
//! are never attempted, and nothing already written is rolled back. Any retry
//! is left to the caller redelivering the whole batch.

use crate::{
    metadata,
    notification::{self, Notification},
    persistence::MetadataStore,
    response::InvocationResult,
    scratch::ScratchArea,
    storage::ObjectStore,
    table,
};
use aws_lambda_events::event::s3::S3Event;
use csvmeta_common::{MetadataRecord, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Bucket notifications are expected to come from
    pub expected_bucket: String,
    pub scratch_dir: PathBuf,
}

/// Filenames stored by a successful batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: Vec<String>,
}

pub struct IngestProcessor {
    objects: Arc<dyn ObjectStore>,
    records: Arc<dyn MetadataStore>,
    scratch: ScratchArea,
    expected_bucket: String,
    clock: fn() -> i64,
}

impl IngestProcessor {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        records: Arc<dyn MetadataStore>,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            objects,
            records,
            scratch: ScratchArea::new(config.scratch_dir),
            expected_bucket: config.expected_bucket,
            clock: metadata::unix_now,
        }
    }

    /// Replace the wall clock used for `upload_timestamp`.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Run one invocation payload and collapse the outcome into a single result.
    pub async fn handle(&self, payload: serde_json::Value) -> InvocationResult {
        let outcome = match notification::parse_event(payload) {
            Ok(event) => self.process_batch(&event).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(report) => {
                info!(processed = report.processed.len(), "Batch processed");
                InvocationResult::success()
            },
            Err(err) => {
                error!(kind = err.kind(), error = %err, "Batch failed");
                InvocationResult::failure(&err)
            },
        }
    }

    pub async fn process_batch(&self, event: &S3Event) -> Result<BatchReport> {
        info!(record_count = event.records.len(), "Processing upload notifications");

        let mut report = BatchReport::default();

        for (index, record) in event.records.iter().enumerate() {
            let notification = Notification::from_record(record)?;
            let span = info_span!(
                "process_record",
                index,
                bucket = %notification.bucket,
                key = %notification.key
            );
            let stored = self.process_notification(&notification).instrument(span).await?;
            report.processed.push(stored.filename);
        }

        Ok(report)
    }

    pub async fn process_notification(&self, notification: &Notification) -> Result<MetadataRecord> {
        if notification.bucket != self.expected_bucket {
            warn!(
                expected = %self.expected_bucket,
                actual = %notification.bucket,
                "Notification is for an unexpected bucket"
            );
        }

        let scratch = self.scratch.file_for(notification.base_name())?;
        let downloaded = self
            .objects
            .download_to(&notification.bucket, &notification.key, scratch.path())
            .await?;
        debug!(bytes = downloaded, path = %scratch.path().display(), "Downloaded object");

        let summary = table::summarize_path(scratch.path())?;
        drop(scratch);

        let file_size_bytes = self
            .objects
            .object_size(&notification.bucket, &notification.key)
            .await?;

        let record = metadata::assemble(notification, file_size_bytes, summary, (self.clock)());
        self.records.upsert(&record).await?;

        info!(
            filename = %record.filename,
            rows = record.row_count,
            columns = record.column_count,
            size = record.file_size_bytes,
            "Successfully processed file and stored metadata"
        );

        Ok(record)
    }
}
