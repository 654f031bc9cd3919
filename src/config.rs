//! Configuration types for walk-bench
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Maximum reasonable concurrency multiplier
const MAX_MULTIPLIER: usize = 64;

/// Benchmark sequential vs bounded-concurrency directory traversal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "walk-bench",
    version,
    about = "Benchmark sequential vs bounded-concurrency directory traversal",
    long_about = "Walks a directory tree twice per concurrency level - once with a \
                  single-threaded depth-first scan and once with a recursive task \
                  fan-out bounded by a thread pool - then prints timing, allocation \
                  and count comparisons for every level from the no-concurrency \
                  baseline up to the logical core count.",
    after_help = "EXAMPLES:\n    \
        walk-bench /data\n    \
        walk-bench /data -m 4\n    \
        walk-bench ~/projects --max-depth 6 -v"
)]
pub struct CliArgs {
    /// Directory tree to benchmark
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Concurrency multiplier applied to the logical core count
    #[arg(short = 'm', long, default_value = "1", value_name = "NUM")]
    pub multiplier: usize,

    /// Maximum traversal depth (unlimited if not set)
    #[arg(short = 'd', long, value_name = "NUM")]
    pub max_depth: Option<usize>,

    /// Verbose output (per-phase debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Root of the tree both walkers traverse
    pub root: PathBuf,

    /// Logical core count; the top of the concurrency sweep
    pub cpu_count: usize,

    /// Multiplier scaling a sweep level into the permit-pool size
    pub multiplier: usize,

    /// Maximum traversal depth
    pub max_depth: Option<usize>,

    /// Verbose logging
    pub verbose: bool,
}

impl BenchConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.multiplier == 0 || args.multiplier > MAX_MULTIPLIER {
            return Err(ConfigError::InvalidMultiplier {
                value: args.multiplier,
                max: MAX_MULTIPLIER,
            });
        }

        let meta = fs::metadata(&args.path).map_err(|_| ConfigError::RootNotFound {
            path: args.path.clone(),
        })?;
        if !meta.is_dir() {
            return Err(ConfigError::NotADirectory { path: args.path });
        }

        Ok(Self {
            root: args.path,
            cpu_count: num_cpus::get(),
            multiplier: args.multiplier,
            max_depth: args.max_depth,
            verbose: args.verbose,
        })
    }

    /// Permit-pool size for one sweep level.
    ///
    /// Level zero is the no-concurrency baseline and always runs with a
    /// single permit; every other level scales by the multiplier.
    pub fn concurrency_at(&self, level: usize) -> usize {
        if level == 0 {
            1
        } else {
            level * self.multiplier
        }
    }
}
