//! Report payload for flushed attachment buckets.
//!
//! The report writer consumes one entry per attachment, keyed by the
//! evidence file's absolute path, with the binary content base64-encoded so
//! the report stream stays text-safe.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::attachment::{AttachmentBucket, AttachmentRecord};

/// One reported attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Absolute path of the evidence file
    #[serde(rename = "File-Location")]
    pub location: String,
    /// Attachment title
    #[serde(rename = "File-Title")]
    pub title: String,
    /// Attachment description
    #[serde(rename = "File-Description")]
    pub description: String,
    /// Size of the binary content in bytes
    #[serde(rename = "File-Size")]
    pub size: u64,
    /// File name component of the location
    #[serde(rename = "File-Name")]
    pub name: String,
    /// Base64-encoded binary content
    #[serde(rename = "File-Content")]
    pub content: String,
    /// MIME type
    #[serde(rename = "File-Type")]
    pub content_type: String,
}

impl From<&AttachmentRecord> for ReportEntry {
    fn from(record: &AttachmentRecord) -> Self {
        Self {
            location: record.source_path.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            size: record.size_bytes,
            name: record.file_name(),
            content: BASE64.encode(&record.binary_content),
            content_type: record.content_type.clone(),
        }
    }
}

/// Build the report entries for a flushed bucket, in bucket order.
#[must_use]
pub fn bucket_report(bucket: &AttachmentBucket) -> Vec<ReportEntry> {
    bucket.iter().map(ReportEntry::from).collect()
}
