//! Test helpers for processor integration tests
//!
//! In-memory implementations of the object store and metadata store so batch
//! behaviour can be checked without AWS.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use aws_lambda_events::event::s3::S3Event;
use csvmeta_common::{IngestError, MetadataRecord, Result};
use csvmeta_ingest::{
    notification,
    persistence::MetadataStore,
    processor::{IngestProcessor, ProcessorConfig},
    storage::ObjectStore,
};
use std::collections::HashMap;
use std::path::Path;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const BUCKET: &str = "uploads";
pub const FIXED_NOW: i64 = 1_714_564_800;

/// Objects keyed by `(bucket, decoded key)`.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    downloads: Mutex<Vec<(String, String)>>,
}

impl MemoryObjectStore {
    pub fn put(&self, bucket: &str, key: &str, content: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), content.into());
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.lock().unwrap().clone()
    }

    fn lookup(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| {
                IngestError::StorageAccess(format!("s3://{}/{}: NoSuchKey", bucket, key))
            })
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn download_to(&self, bucket: &str, key: &str, path: &Path) -> Result<u64> {
        self.downloads
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));
        let content = self.lookup(bucket, key)?;
        std::fs::write(path, &content)?;
        Ok(content.len() as u64)
    }

    async fn object_size(&self, bucket: &str, key: &str) -> Result<i64> {
        Ok(self.lookup(bucket, key)?.len() as i64)
    }
}

/// Upsert-by-filename store that also logs every write in order.
#[derive(Default)]
pub struct MemoryMetadataStore {
    records: Mutex<HashMap<String, MetadataRecord>>,
    writes: Mutex<Vec<String>>,
    reject: Mutex<Option<String>>,
}

impl MemoryMetadataStore {
    /// Fail writes for this filename.
    pub fn reject(&self, filename: &str) {
        *self.reject.lock().unwrap() = Some(filename.to_string());
    }

    pub fn get(&self, filename: &str) -> Option<MetadataRecord> {
        self.records.lock().unwrap().get(filename).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn upsert(&self, record: &MetadataRecord) -> Result<()> {
        if self.reject.lock().unwrap().as_deref() == Some(record.filename.as_str()) {
            return Err(IngestError::PersistenceWrite(format!(
                "PutItem {}: ProvisionedThroughputExceededException",
                record.filename
            )));
        }

        self.writes.lock().unwrap().push(record.filename.clone());
        self.records
            .lock()
            .unwrap()
            .insert(record.filename.clone(), record.clone());
        Ok(())
    }
}

pub struct Harness {
    pub objects: Arc<MemoryObjectStore>,
    pub records: Arc<MemoryMetadataStore>,
    pub processor: IngestProcessor,
    pub scratch: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        let objects = Arc::new(MemoryObjectStore::default());
        let records = Arc::new(MemoryMetadataStore::default());
        let scratch = tempfile::tempdir().unwrap();

        let processor = IngestProcessor::new(
            objects.clone(),
            records.clone(),
            ProcessorConfig {
                expected_bucket: BUCKET.to_string(),
                scratch_dir: scratch.path().to_path_buf(),
            },
        )
        .with_clock(|| FIXED_NOW);

        Self {
            objects,
            records,
            processor,
            scratch,
        }
    }

    /// Number of files left behind in the scratch directory.
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.scratch.path()).unwrap().count()
    }
}

/// CSV with the given header and `rows` data rows.
pub fn csv_with_rows(header: &[&str], rows: usize) -> String {
    let mut out = header.join(",");
    out.push('\n');
    for row in 0..rows {
        let cells: Vec<String> = (0..header.len()).map(|col| format!("{}", row * 10 + col)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// One `ObjectCreated:Put` record shaped like the ones S3 delivers.
pub fn upload_record(bucket: &str, key: &str) -> Value {
    json!({
        "eventVersion": "2.1",
        "eventSource": "aws:s3",
        "awsRegion": "us-east-1",
        "eventTime": "2024-05-01T12:00:00.000Z",
        "eventName": "ObjectCreated:Put",
        "userIdentity": { "principalId": "AWS:AIDAEXAMPLE" },
        "requestParameters": { "sourceIPAddress": "203.0.113.10" },
        "responseElements": {},
        "s3": {
            "s3SchemaVersion": "1.0",
            "configurationId": "csv-uploads",
            "bucket": {
                "name": bucket,
                "ownerIdentity": { "principalId": "EXAMPLE" },
                "arn": format!("arn:aws:s3:::{}", bucket)
            },
            "object": { "key": key, "size": 0, "eTag": "0", "sequencer": "0" }
        }
    })
}

/// Raw invocation payload with one record per `(bucket, key)`.
pub fn upload_payload<'a>(objects: impl IntoIterator<Item = (&'a str, &'a str)>) -> Value {
    let records: Vec<Value> = objects
        .into_iter()
        .map(|(bucket, key)| upload_record(bucket, key))
        .collect();
    json!({ "Records": records })
}

pub fn upload_event<'a>(objects: impl IntoIterator<Item = (&'a str, &'a str)>) -> S3Event {
    notification::parse_event(upload_payload(objects)).unwrap()
}
