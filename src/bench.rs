//! Benchmark driver
//!
//! Orchestrates the concurrency sweep: for each level from the
//! no-concurrency baseline up to the logical core count, runs the
//! sequential walker and the bounded-concurrency walker once each against
//! the same root, times them, samples allocation counters around each
//! invocation, reconciles the result sets and prints one comparison table.
//!
//! Any walker error is fatal to the entire run - no retries across levels,
//! no partial report. A path-set mismatch is the one reported condition
//! that does not abort: the offending paths are printed and the sweep
//! continues.

use crate::config::BenchConfig;
use crate::error::{Result, ScanResult};
use crate::mem;
use crate::report::{self, ComparisonRow};
use crate::scan::{compare_scans, ParallelWalker, ScanEntry, SequentialWalker};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Label for the sequential baseline rows
const SEQUENTIAL_LABEL: &str = "Sequential";

/// Label for the bounded-concurrency rows
const CONCURRENT_LABEL: &str = "Concurrent";

/// One timed walker invocation.
struct TimedScan {
    entries: Vec<ScanEntry>,
    duration: Duration,
    bytes_allocated: u64,
}

/// Runs the full benchmark sweep and feeds the report printer.
pub struct BenchRunner {
    config: BenchConfig,
}

impl BenchRunner {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Run both walkers at every concurrency level and print one comparison
    /// table per level.
    pub fn run(&self) -> Result<()> {
        info!(
            root = %self.config.root.display(),
            cpus = self.config.cpu_count,
            multiplier = self.config.multiplier,
            "starting benchmark sweep"
        );

        report::print_header(&self.config.root, self.config.cpu_count, self.config.multiplier);

        let mut all_matched = true;
        for level in 0..=self.config.cpu_count {
            all_matched &= self.run_level(level)?;
        }

        report::print_footer(self.config.cpu_count + 1, all_matched);

        info!("benchmark sweep complete");
        Ok(())
    }

    /// Run one sweep level. Returns whether the two path sets matched.
    fn run_level(&self, level: usize) -> Result<bool> {
        let concurrency = self.config.concurrency_at(level);
        debug!(level, concurrency, "running sweep level");

        let sequential = timed(|| {
            SequentialWalker::new(&self.config.root)
                .max_depth(self.config.max_depth)
                .run()
        })?;

        let concurrent = timed(|| {
            ParallelWalker::new(&self.config.root, concurrency)
                .max_depth(self.config.max_depth)
                .run()
        })?;

        let comparison = compare_scans(&sequential.entries, &concurrent.entries);
        let matched = comparison.paths_match();
        if !matched {
            warn!(
                level,
                only_in_sequential = comparison.only_in_sequential.len(),
                only_in_parallel = comparison.only_in_parallel.len(),
                "traversal strategies disagree on the visited path set"
            );
        }

        let (sequential_ratio, concurrent_ratio) =
            relative_times(sequential.duration, concurrent.duration);

        let title = if level == 0 {
            format!(
                "Baseline: no concurrency | Directory scan comparison: {}",
                self.config.root.display()
            )
        } else {
            format!(
                "Test {} | Directory scan comparison: {}",
                level,
                self.config.root.display()
            )
        };

        let concurrency_cell = if level == 0 { None } else { Some(concurrency) };

        report::print_comparison(
            &title,
            vec![
                ComparisonRow::new(
                    SEQUENTIAL_LABEL,
                    None,
                    None,
                    &comparison.sequential,
                    sequential.bytes_allocated,
                    sequential.duration,
                    sequential_ratio,
                ),
                ComparisonRow::new(
                    CONCURRENT_LABEL,
                    Some(self.config.cpu_count),
                    concurrency_cell,
                    &comparison.parallel,
                    concurrent.bytes_allocated,
                    concurrent.duration,
                    concurrent_ratio,
                ),
            ],
        );

        report::print_mismatches("sequential", &comparison.only_in_sequential);
        report::print_mismatches("concurrent", &comparison.only_in_parallel);

        Ok(matched)
    }
}

/// Time one walker invocation and sample allocation counters around it.
fn timed(scan: impl FnOnce() -> ScanResult<Vec<ScanEntry>>) -> Result<TimedScan> {
    let before = mem::snapshot();
    let start = Instant::now();
    let entries = scan()?;
    let duration = start.elapsed();
    let bytes_allocated = mem::snapshot().bytes_since(&before);

    Ok(TimedScan {
        entries,
        duration,
        bytes_allocated,
    })
}

/// Relative wall-clock cost of the two strategies.
///
/// The faster side is exactly 1.0; the slower side is slower-duration
/// divided by faster-duration, rounded to one decimal place. Equal
/// durations report 1.0 for both.
pub fn relative_times(sequential: Duration, concurrent: Duration) -> (f64, f64) {
    if sequential > concurrent {
        (
            round_tenth(sequential.as_secs_f64() / concurrent.as_secs_f64()),
            1.0,
        )
    } else if concurrent > sequential {
        (
            1.0,
            round_tenth(concurrent.as_secs_f64() / sequential.as_secs_f64()),
        )
    } else {
        (1.0, 1.0)
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
