//! Evidence attachments collected per test method.
//!
//! Every notable event in a test can capture evidence (typically a
//! screenshot) as an [`AttachmentRecord`]. Records accumulate in an
//! insertion-ordered [`AttachmentBucket`] owned by exactly one
//! (context, method) pair; attaching under a different pair starts a fresh
//! bucket and the previous one becomes unreachable — the collaborator that
//! drives method transitions must flush before switching.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::result::SondarResult;

/// Identity of one executing test method within its context
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestId {
    /// Test context (suite/class) identifier
    pub context: String,
    /// Test method identifier
    pub method: String,
}

impl TestId {
    /// Create a test identity
    #[must_use]
    pub fn new(context: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            method: method.into(),
        }
    }
}

impl std::fmt::Display for TestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.context, self.method)
    }
}

/// One piece of captured evidence. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    /// Raw captured bytes
    pub binary_content: Vec<u8>,
    /// MIME type (e.g. "image/png")
    pub content_type: String,
    /// Free-form description of what the evidence shows
    pub description: String,
    /// Short title. Be creative!
    pub title: String,
    /// Size of the binary content in bytes
    pub size_bytes: u64,
    /// Absolute path of the evidence file; unique key within a bucket
    pub source_path: String,
}

impl AttachmentRecord {
    /// Create a record from already-captured bytes
    #[must_use]
    pub fn new(
        binary_content: Vec<u8>,
        content_type: impl Into<String>,
        description: impl Into<String>,
        title: impl Into<String>,
        source_path: impl Into<String>,
    ) -> Self {
        let size_bytes = binary_content.len() as u64;
        Self {
            binary_content,
            content_type: content_type.into(),
            description: description.into(),
            title: title.into(),
            size_bytes,
            source_path: source_path.into(),
        }
    }

    /// Create a record by reading an evidence file from disk.
    ///
    /// The file name doubles as the title and the path as the key.
    pub fn from_file(
        path: impl AsRef<Path>,
        content_type: impl Into<String>,
        description: impl Into<String>,
    ) -> SondarResult<Self> {
        let path = path.as_ref();
        let binary_content = std::fs::read(path)?;
        let title = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        Ok(Self::new(
            binary_content,
            content_type,
            description,
            title,
            path.to_string_lossy(),
        ))
    }

    /// File name component of the source path
    #[must_use]
    pub fn file_name(&self) -> String {
        Path::new(&self.source_path)
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned())
    }
}

/// Insertion-ordered map from source path to record.
///
/// Re-attaching an existing path overwrites the record but keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentBucket {
    entries: Vec<AttachmentRecord>,
}

impl AttachmentBucket {
    /// Create an empty bucket
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record keyed by its source path
    pub fn insert(&mut self, record: AttachmentRecord) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.source_path == record.source_path)
        {
            Some(existing) => *existing = record,
            None => self.entries.push(record),
        }
    }

    /// Look up a record by source path
    #[must_use]
    pub fn get(&self, source_path: &str) -> Option<&AttachmentRecord> {
        self.entries.iter().find(|e| e.source_path == source_path)
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &AttachmentRecord> {
        self.entries.iter()
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bucket holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects evidence for the currently executing test method.
///
/// Holds at most one live bucket at a time. This type assumes serial test
/// execution: it is plain owned state with no locking, meant to live inside
/// a per-run fixture (see [`crate::session::TestSession`]), never behind a
/// process-wide static.
#[derive(Debug, Default)]
pub struct AttachmentAggregator {
    current: Option<(TestId, AttachmentBucket)>,
}

impl AttachmentAggregator {
    /// Create an empty aggregator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a record under the given test identity.
    ///
    /// If the current bucket belongs to a different identity (or none
    /// exists) a fresh bucket is started; the previous bucket is discarded
    /// and must already have been flushed by the owner of method
    /// transitions.
    pub fn attach(&mut self, test: &TestId, record: AttachmentRecord) {
        let owned = matches!(&self.current, Some((owner, _)) if owner == test);
        if !owned {
            self.current = Some((test.clone(), AttachmentBucket::new()));
        }
        if let Some((_, bucket)) = &mut self.current {
            bucket.insert(record);
        }
    }

    /// Read the bucket for the given identity.
    ///
    /// Returns a copy of the current bucket when it is owned by `test`,
    /// otherwise an empty bucket. Never clears the aggregator; clearing
    /// happens implicitly on the next method's first attach.
    #[must_use]
    pub fn flush(&self, test: &TestId) -> AttachmentBucket {
        match &self.current {
            Some((owner, bucket)) if owner == test => bucket.clone(),
            _ => AttachmentBucket::new(),
        }
    }

    /// Identity owning the current bucket, if any
    #[must_use]
    pub fn current_owner(&self) -> Option<&TestId> {
        self.current.as_ref().map(|(owner, _)| owner)
    }
}
