//! Metadata persistence
//!
//! Records are written with an unconditional `PutItem`, so a second write for
//! the same filename replaces the first (last writer wins).

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use csvmeta_common::{IngestError, MetadataRecord, Result};
use std::collections::HashMap;
use tracing::{debug, instrument};

pub mod config;

pub use config::PersistenceConfig;

/// Write-or-replace of a metadata record keyed by `filename`.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn upsert(&self, record: &MetadataRecord) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct DynamoMetadataStore {
    client: Client,
    table: String,
}

impl DynamoMetadataStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, config: &PersistenceConfig) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(Client::from_conf(builder.build()), config.table.clone())
    }
}

/// DynamoDB item for a record. Attribute names match the record's field names.
pub fn record_to_item(record: &MetadataRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "filename".to_string(),
            AttributeValue::S(record.filename.clone()),
        ),
        (
            "upload_timestamp".to_string(),
            AttributeValue::N(record.upload_timestamp.to_string()),
        ),
        (
            "file_size_bytes".to_string(),
            AttributeValue::N(record.file_size_bytes.to_string()),
        ),
        (
            "row_count".to_string(),
            AttributeValue::N(record.row_count.to_string()),
        ),
        (
            "column_count".to_string(),
            AttributeValue::N(record.column_count.to_string()),
        ),
        (
            "column_names".to_string(),
            AttributeValue::L(
                record
                    .column_names
                    .iter()
                    .cloned()
                    .map(AttributeValue::S)
                    .collect(),
            ),
        ),
    ])
}

#[async_trait]
impl MetadataStore for DynamoMetadataStore {
    #[instrument(skip(self, record), fields(filename = %record.filename, table = %self.table))]
    async fn upsert(&self, record: &MetadataRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| {
                IngestError::PersistenceWrite(format!(
                    "PutItem {} into {}: {}",
                    record.filename,
                    self.table,
                    DisplayErrorContext(e)
                ))
            })?;

        debug!("Stored metadata item");

        Ok(())
    }
}
