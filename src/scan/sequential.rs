//! Sequential baseline walker
//!
//! A classic single-threaded pre-order descent built on `walkdir`. This is
//! the reference implementation the bounded-concurrency walker is checked
//! against: both must discover the same path set for the same root.

use crate::error::{ScanError, ScanResult};
use crate::scan::record::ScanEntry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Single-threaded depth-first walker.
pub struct SequentialWalker {
    root: PathBuf,
    max_depth: Option<usize>,
}

impl SequentialWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: None,
        }
    }

    /// Limit traversal depth; the root is depth zero. `None` is unlimited.
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Walk the tree, producing one record per reachable entry including
    /// the root itself.
    ///
    /// The first unlistable directory or unreadable metadata aborts the
    /// whole walk; no partial result is returned.
    pub fn run(&self) -> ScanResult<Vec<ScanEntry>> {
        // Validate the root up front so a missing or unstatable root is
        // classified the same way the concurrent walker classifies it.
        fs::metadata(&self.root).map_err(|e| ScanError::root(self.root.clone(), e))?;

        let mut walker = WalkDir::new(&self.root);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut entries = Vec::new();
        for item in walker {
            let entry = item.map_err(|e| list_error(&self.root, e))?;
            let meta = entry.metadata().map_err(|e| ScanError::Metadata {
                path: entry.path().to_path_buf(),
                source: io_from_walkdir(e),
            })?;
            entries.push(ScanEntry::from_metadata(entry.into_path(), &meta));
        }

        debug!(
            root = %self.root.display(),
            entries = entries.len(),
            "sequential walk complete"
        );

        Ok(entries)
    }
}

/// Map a walkdir iteration failure onto the listing error taxonomy.
fn list_error(root: &Path, err: walkdir::Error) -> ScanError {
    let path = err.path().unwrap_or(root).to_path_buf();
    ScanError::ReadDir {
        path,
        source: io_from_walkdir(err),
    }
}

fn io_from_walkdir(err: walkdir::Error) -> io::Error {
    err.into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop detected"))
}
