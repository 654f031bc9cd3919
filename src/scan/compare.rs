//! Result reconciliation between the two traversal strategies.
//!
//! A pure function over two result sets: per-strategy aggregate totals plus
//! the two-way set difference of visited paths. Both strategies walking an
//! unchanging tree must produce an empty difference; anything else points at
//! a walker defect (or a filesystem mutating underneath the scan) and is
//! always surfaced, never absorbed.

use crate::scan::record::ScanEntry;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Aggregate totals for one traversal strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyTotals {
    /// Number of non-directory entries
    pub files: u64,

    /// Number of directories, the root included
    pub dirs: u64,

    /// Files plus directories
    pub objects: u64,

    /// Sum of file sizes; directories contribute nothing
    pub bytes: u64,
}

impl StrategyTotals {
    fn tally(entries: &[ScanEntry]) -> Self {
        let mut totals = StrategyTotals::default();
        for entry in entries {
            if entry.is_dir {
                totals.dirs += 1;
            } else {
                totals.files += 1;
                totals.bytes += entry.size;
            }
        }
        totals.objects = totals.files + totals.dirs;
        totals
    }
}

/// Outcome of comparing two scans of the same root.
#[derive(Debug, Clone, Default)]
pub struct ScanComparison {
    /// Totals for the sequential baseline
    pub sequential: StrategyTotals,

    /// Totals for the bounded-concurrency walker
    pub parallel: StrategyTotals,

    /// Paths the sequential walker saw but the concurrent walker missed,
    /// sorted
    pub only_in_sequential: Vec<PathBuf>,

    /// Paths the concurrent walker saw but the sequential walker missed,
    /// sorted
    pub only_in_parallel: Vec<PathBuf>,
}

impl ScanComparison {
    /// True when both strategies visited an identical path set.
    pub fn paths_match(&self) -> bool {
        self.only_in_sequential.is_empty() && self.only_in_parallel.is_empty()
    }
}

/// Compare two result sets for the same root.
///
/// Deterministic given identical inputs, difference-list order included;
/// neither input is mutated.
pub fn compare_scans(sequential: &[ScanEntry], parallel: &[ScanEntry]) -> ScanComparison {
    let sequential_paths: HashSet<&Path> =
        sequential.iter().map(|e| e.path.as_path()).collect();
    let parallel_paths: HashSet<&Path> = parallel.iter().map(|e| e.path.as_path()).collect();

    let mut only_in_sequential: Vec<PathBuf> = sequential_paths
        .difference(&parallel_paths)
        .map(|path| path.to_path_buf())
        .collect();
    only_in_sequential.sort();

    let mut only_in_parallel: Vec<PathBuf> = parallel_paths
        .difference(&sequential_paths)
        .map(|path| path.to_path_buf())
        .collect();
    only_in_parallel.sort();

    ScanComparison {
        sequential: StrategyTotals::tally(sequential),
        parallel: StrategyTotals::tally(parallel),
        only_in_sequential,
        only_in_parallel,
    }
}
