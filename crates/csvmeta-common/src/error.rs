//! Error types for csvmeta

use thiserror::Error;

/// Result type alias for csvmeta operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Every way processing an upload notification can fail.
///
/// Inside a batch all variants are treated alike: the first one raised aborts
/// the batch and its `Display` text becomes the failure body.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid notification: {0}")]
    NotificationDecode(String),

    #[error("Storage access error: {0}")]
    StorageAccess(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Persistence write error: {0}")]
    PersistenceWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::NotificationDecode(_) => "notification_decode",
            IngestError::StorageAccess(_) => "storage_access",
            IngestError::Decode(_) => "decode",
            IngestError::PersistenceWrite(_) => "persistence_write",
            IngestError::Config(_) => "config",
            IngestError::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::NotificationDecode(err.to_string())
    }
}
