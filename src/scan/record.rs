//! Shared value type produced by both traversal strategies.

use std::fs::Metadata;
use std::path::PathBuf;

/// A single filesystem entry observed during a traversal.
///
/// Within one result set every `path` appears exactly once. Records are
/// immutable once built and owned by the result collection they were
/// appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// Location of the file or directory, rooted at the scanned path.
    pub path: PathBuf,

    /// Whether the entry is a directory.
    pub is_dir: bool,

    /// Byte length reported by metadata. Meaningful for files only;
    /// aggregate size sums skip directories.
    pub size: u64,
}

impl ScanEntry {
    /// Build a record from a path and its metadata.
    pub fn from_metadata(path: PathBuf, meta: &Metadata) -> Self {
        Self {
            path,
            is_dir: meta.is_dir(),
            size: meta.len(),
        }
    }
}
