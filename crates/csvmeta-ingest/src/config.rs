//! Configuration management
//!
//! Read once during the Lambda init phase and fixed for the process lifetime.

use crate::{persistence::PersistenceConfig, processor::ProcessorConfig, storage::StorageConfig};
use csvmeta_common::{IngestError, Result};
use std::path::PathBuf;

/// Default scratch directory; the only writable path on Lambda.
pub const DEFAULT_SCRATCH_DIR: &str = "/tmp";

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub storage: StorageConfig,
    pub persistence: PersistenceConfig,
    pub scratch_dir: PathBuf,
}

impl IngestConfig {
    /// Load configuration from the process environment (and `.env` when present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            storage: StorageConfig::from_lookup(&lookup)?,
            persistence: PersistenceConfig::from_lookup(&lookup)?,
            scratch_dir: lookup("SCRATCH_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRATCH_DIR)),
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.bucket.trim().is_empty() {
            return Err(IngestError::Config(
                "S3_BUCKET_NAME cannot be empty".to_string(),
            ));
        }

        if self.persistence.table.trim().is_empty() {
            return Err(IngestError::Config(
                "DYNAMODB_TABLE cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn processor_config(&self) -> ProcessorConfig {
        ProcessorConfig {
            expected_bucket: self.storage.bucket.clone(),
            scratch_dir: self.scratch_dir.clone(),
        }
    }
}
