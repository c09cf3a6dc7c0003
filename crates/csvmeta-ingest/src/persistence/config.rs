use csvmeta_common::{IngestError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// DynamoDB table holding one item per filename
    pub table: String,
    pub endpoint: Option<String>,
}

impl PersistenceConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            table: lookup("DYNAMODB_TABLE").ok_or_else(|| {
                IngestError::Config("DYNAMODB_TABLE must be provided".to_string())
            })?,
            endpoint: lookup("DYNAMODB_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }
}
