//! S3 upload notification payloads
//!
//! Payloads arrive as raw JSON and are decoded inside the invocation, so a
//! payload that is not an S3 event fails the batch like any other error.
//! Bucket name and key are optional in the event model; a record missing
//! either fails when the batch reaches it.

use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use csvmeta_common::{IngestError, Result};

pub fn parse_event(payload: serde_json::Value) -> Result<S3Event> {
    if payload.get("Records").is_none() {
        return Err(IngestError::NotificationDecode(
            "missing field `Records`".to_string(),
        ));
    }
    Ok(serde_json::from_value(payload)?)
}

/// Decode an S3 notification key: `+` is a space, then percent escapes.
/// Invalid UTF-8 after decoding becomes U+FFFD.
pub fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// A resolved object reference with the key already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub bucket: String,
    pub key: String,
}

impl Notification {
    pub fn from_record(record: &S3EventRecord) -> Result<Self> {
        let bucket = record.s3.bucket.name.as_deref().ok_or_else(|| {
            IngestError::NotificationDecode("record has no s3.bucket.name".to_string())
        })?;

        let key = record.s3.object.key.as_deref().ok_or_else(|| {
            IngestError::NotificationDecode("record has no s3.object.key".to_string())
        })?;

        Ok(Self {
            bucket: bucket.to_string(),
            key: decode_object_key(key),
        })
    }

    /// Final path segment of the key.
    pub fn base_name(&self) -> &str {
        match self.key.rfind('/') {
            Some(idx) => &self.key[idx + 1..],
            None => &self.key,
        }
    }
}
