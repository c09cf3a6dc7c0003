//! Metadata record assembly

use crate::notification::Notification;
use csvmeta_common::{MetadataRecord, TableSummary};

/// Wall-clock unix seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// `now` is the time the record is computed, not the object's upload time.
pub fn assemble(
    notification: &Notification,
    file_size_bytes: i64,
    summary: TableSummary,
    now: i64,
) -> MetadataRecord {
    MetadataRecord::new(notification.key.clone(), file_size_bytes, summary, now)
}
