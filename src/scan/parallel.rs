//! Bounded-concurrency walker
//!
//! The subject under test: one traversal task per discovered directory,
//! fanned out recursively onto a dedicated thread pool whose size is the
//! concurrency limit. The pool is the permit mechanism - a spawned task
//! cannot begin listing until a pool worker picks it up, and its permit is
//! released when the task returns, success or failure.
//!
//! # Architecture
//!
//! ```text
//!                  ┌───────────────────────────┐
//!                  │    ParallelWalker::run    │
//!                  │  stat root, seed 1 task   │
//!                  └─────────────┬─────────────┘
//!                                │ spawn into scope
//!           ┌────────────────────┼────────────────────┐
//!     ┌─────▼─────┐        ┌─────▼─────┐        ┌─────▼─────┐
//!     │ dir task  │        │ dir task  │  ...   │ dir task  │
//!     │ read_dir  │        │ read_dir  │        │ read_dir  │
//!     │ buffer    │        │ buffer    │        │ buffer    │
//!     └─────┬─────┘        └─────┬─────┘        └─────┬─────┘
//!           │     one task spawned per subdirectory   │
//!           └─────────────────┬────────────────────────┘
//!                             ▼ single lock per batch
//!                   Mutex<Vec<ScanEntry>>
//! ```
//!
//! Each task builds its record buffer without contention and appends it to
//! the shared sink in one lock acquisition; the lock is never held across a
//! filesystem call. Completion is the scope barrier: the pool scope returns
//! only once every transitively spawned task has finished.

use crate::error::{ScanError, ScanResult};
use crate::scan::record::ScanEntry;
use rayon::{Scope, ThreadPoolBuilder};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use tracing::debug;

/// Shared state for one walker invocation.
///
/// The sink mutex is the only lock in the walker. The error slot is a
/// set-at-most-once mailbox: the first failing task fills it and later
/// publishers silently lose.
struct ScanShared {
    sink: Mutex<Vec<ScanEntry>>,
    first_error: OnceLock<ScanError>,
    tasks_spawned: AtomicU64,
}

impl ScanShared {
    /// Best-effort, non-blocking error publish; first error wins.
    fn publish(&self, err: ScanError) {
        let _ = self.first_error.set(err);
    }

    fn failed(&self) -> bool {
        self.first_error.get().is_some()
    }
}

/// Concurrency-bounded recursive walker.
///
/// Produces a result set equivalent, as a set of paths, to
/// [`SequentialWalker`](crate::scan::SequentialWalker) for the same root.
/// A concurrency of 1 is not a special-cased code path - it is simply the
/// degenerate pool size, and must still produce a correct result.
pub struct ParallelWalker {
    root: PathBuf,
    concurrency: usize,
    max_depth: Option<usize>,
    tasks_spawned: AtomicU64,
}

impl ParallelWalker {
    /// Create a walker for `root` with up to `concurrency` simultaneously
    /// active directory listings. A concurrency of zero is clamped to one.
    pub fn new(root: impl Into<PathBuf>, concurrency: usize) -> Self {
        Self {
            root: root.into(),
            concurrency: concurrency.max(1),
            max_depth: None,
            tasks_spawned: AtomicU64::new(0),
        }
    }

    /// Limit traversal depth; the root is depth zero. `None` is unlimited.
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Number of traversal tasks spawned by the most recent [`run`].
    ///
    /// With no depth limit this equals the number of directories visited,
    /// one task per directory.
    ///
    /// [`run`]: ParallelWalker::run
    pub fn tasks_spawned(&self) -> u64 {
        self.tasks_spawned.load(Ordering::Relaxed)
    }

    /// Walk the tree, producing one record per reachable entry including
    /// the root itself.
    ///
    /// Fail-fast: the first task-level error becomes the walker's result.
    /// In-flight tasks are not cancelled - they observe the error slot,
    /// return early, and whatever they appended is discarded along with the
    /// rest of the sink.
    pub fn run(&self) -> ScanResult<Vec<ScanEntry>> {
        let root_meta =
            fs::metadata(&self.root).map_err(|e| ScanError::root(self.root.clone(), e))?;

        let shared = ScanShared {
            sink: Mutex::new(vec![ScanEntry::from_metadata(self.root.clone(), &root_meta)]),
            first_error: OnceLock::new(),
            tasks_spawned: AtomicU64::new(0),
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .thread_name(|i| format!("scan-{i}"))
            .build()?;

        // A directory at depth d is listed only when its children, at depth
        // d + 1, are still within the limit. Matches walkdir::max_depth.
        let list_root = root_meta.is_dir() && self.max_depth.map_or(true, |limit| limit > 0);
        if list_root {
            shared.tasks_spawned.fetch_add(1, Ordering::Relaxed);
            let root = self.root.clone();
            let max_depth = self.max_depth;
            pool.scope(|scope| walk_dir(scope, root, 0, &shared, max_depth));
        }

        self.tasks_spawned.store(
            shared.tasks_spawned.load(Ordering::Relaxed),
            Ordering::Relaxed,
        );

        if let Some(err) = shared.first_error.into_inner() {
            return Err(err);
        }

        let entries = shared
            .sink
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        debug!(
            root = %self.root.display(),
            entries = entries.len(),
            tasks = self.tasks_spawned(),
            concurrency = self.concurrency,
            "concurrent walk complete"
        );

        Ok(entries)
    }
}

/// One traversal task: list `dir`, buffer a record per child, spawn a task
/// per child directory, then append the buffer under the sink lock.
fn walk_dir<'s>(
    scope: &Scope<'s>,
    dir: PathBuf,
    depth: usize,
    shared: &'s ScanShared,
    max_depth: Option<usize>,
) {
    // A sibling already failed; skip the listing and let the scope drain.
    if shared.failed() {
        return;
    }

    let listing = match fs::read_dir(&dir) {
        Ok(listing) => listing,
        Err(source) => {
            shared.publish(ScanError::ReadDir { path: dir, source });
            return;
        }
    };

    let mut buffer = Vec::new();
    for item in listing {
        let entry = match item {
            Ok(entry) => entry,
            Err(source) => {
                shared.publish(ScanError::ReadDir { path: dir, source });
                return;
            }
        };

        let path = entry.path();
        // DirEntry::metadata does not traverse symlinks, so a link to a
        // directory is recorded as a non-directory and never descended,
        // matching the sequential walker.
        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(source) => {
                shared.publish(ScanError::Metadata { path, source });
                return;
            }
        };

        let is_dir = meta.is_dir();
        buffer.push(ScanEntry::from_metadata(path.clone(), &meta));

        if is_dir && max_depth.map_or(true, |limit| depth + 1 < limit) {
            shared.tasks_spawned.fetch_add(1, Ordering::Relaxed);
            scope.spawn(move |scope| walk_dir(scope, path, depth + 1, shared, max_depth));
        }
    }

    let mut sink = shared.sink.lock().unwrap_or_else(PoisonError::into_inner);
    sink.append(&mut buffer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_schedules_no_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let walker = ParallelWalker::new(&missing, 4);
        let err = walker.run().unwrap_err();

        assert!(matches!(err, ScanError::RootNotFound { .. }));
        assert_eq!(walker.tasks_spawned(), 0);
    }

    #[test]
    fn test_one_task_per_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a/a1")).unwrap();
        std::fs::create_dir_all(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("a/file.txt"), b"x").unwrap();

        let walker = ParallelWalker::new(dir.path(), 4);
        let entries = walker.run().unwrap();

        // Directories: root, a, a/a1, b.
        assert_eq!(walker.tasks_spawned(), 4);
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn test_empty_directory_spawns_no_children() {
        let dir = tempfile::tempdir().unwrap();

        let walker = ParallelWalker::new(dir.path(), 4);
        let entries = walker.run().unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(walker.tasks_spawned(), 1);
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f"), b"data").unwrap();

        let entries = ParallelWalker::new(dir.path(), 0).run().unwrap();
        assert_eq!(entries.len(), 2);
    }
}
