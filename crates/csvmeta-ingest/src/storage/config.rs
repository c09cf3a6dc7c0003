use csvmeta_common::{IngestError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Bucket the handler expects notifications from
    pub bucket: String,
    /// Custom endpoint, e.g. MinIO or LocalStack
    pub endpoint: Option<String>,
    pub path_style: bool,
}

impl StorageConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            bucket: lookup("S3_BUCKET_NAME").ok_or_else(|| {
                IngestError::Config("S3_BUCKET_NAME must be provided".to_string())
            })?,
            endpoint: lookup("S3_ENDPOINT").filter(|v| !v.is_empty()),
            path_style: lookup("S3_PATH_STYLE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }
}
