//! walk-bench - Directory Traversal Benchmark
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use walk_bench::bench::BenchRunner;
use walk_bench::config::{BenchConfig, CliArgs};
use walk_bench::mem::CountingAllocator;

// The memory column of the report reads these counters; without the
// counting allocator installed they would stay at zero.
#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();

    setup_logging(args.verbose);

    let config = BenchConfig::from_args(args).context("Invalid configuration")?;

    BenchRunner::new(config).run().context("Benchmark failed")?;

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("walk_bench=debug,warn")
    } else {
        EnvFilter::new("walk_bench=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
