//! walk-bench - Directory Traversal Benchmark
//!
//! Benchmarks two strategies for enumerating every file and directory under
//! a root path - a single-threaded depth-first walk and a
//! concurrency-bounded recursive fan-out walk - and reports relative
//! performance plus a correctness check that both strategies discovered the
//! same path set.
//!
//! # Features
//!
//! - **Two walkers, one contract**: the sequential walker is the reference
//!   implementation; the concurrent walker must match its path set exactly
//!   at every concurrency level.
//!
//! - **Bounded fan-out**: the concurrent walker spawns one traversal task
//!   per discovered directory onto a dedicated thread pool sized to the
//!   concurrency limit, so the pool doubles as the permit mechanism.
//!
//! - **Allocation accounting**: a counting global allocator reports bytes
//!   allocated during each walker invocation alongside wall-clock time.
//!
//! - **Fail-fast**: any filesystem error aborts the walker that hit it and
//!   the whole benchmark run with it; only a path-set mismatch is reported
//!   without aborting.
//!
//! # Architecture
//!
//! ```text
//!                     ┌─────────────────────────┐
//!                     │       BenchRunner       │
//!                     │  sweep levels 0..=CPUs  │
//!                     └────────────┬────────────┘
//!                                  │ per level, same root
//!                  ┌───────────────┴───────────────┐
//!        ┌─────────▼──────────┐         ┌──────────▼─────────┐
//!        │  SequentialWalker  │         │   ParallelWalker   │
//!        │  depth-first scan  │         │  task-per-dir pool │
//!        └─────────┬──────────┘         └──────────┬─────────┘
//!                  │       Vec<ScanEntry>          │
//!                  └───────────────┬───────────────┘
//!                        ┌─────────▼─────────┐
//!                        │   compare_scans   │
//!                        │  totals + diffs   │
//!                        └─────────┬─────────┘
//!                                  ▼
//!                     one comparison table per level
//! ```
//!
//! # Example
//!
//! ```bash
//! # Sweep from the baseline up to the logical core count
//! walk-bench /data
//!
//! # Scale the permit pool by 4x per level
//! walk-bench /data -m 4
//! ```

pub mod bench;
pub mod config;
pub mod error;
pub mod mem;
pub mod report;
pub mod scan;

pub use bench::BenchRunner;
pub use config::{BenchConfig, CliArgs};
pub use error::{BenchError, ConfigError, Result, ScanError, ScanResult};
pub use mem::{AllocSnapshot, CountingAllocator};
pub use scan::{
    compare_scans, ParallelWalker, ScanComparison, ScanEntry, SequentialWalker, StrategyTotals,
};
