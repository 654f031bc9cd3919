//! Terminal rendering of benchmark results
//!
//! Table rows are plain value structs handed to `tabled`; headers, summary
//! lines and mismatch listings use `console` styling. The core hands this
//! module structured results and never formats anything itself.

use crate::scan::StrategyTotals;
use console::style;
use humansize::{format_size, BINARY};
use std::path::Path;
use std::time::Duration;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// One strategy's row in a per-level comparison table.
#[derive(Debug, Clone, Tabled)]
pub struct ComparisonRow {
    #[tabled(rename = "Strategy")]
    pub strategy: String,

    #[tabled(rename = "CPUs")]
    pub cpus: String,

    #[tabled(rename = "Concurrency")]
    pub concurrency: String,

    #[tabled(rename = "Files")]
    pub files: String,

    #[tabled(rename = "Directories")]
    pub directories: String,

    #[tabled(rename = "Objects")]
    pub objects: String,

    #[tabled(rename = "Size")]
    pub size: String,

    #[tabled(rename = "Memory")]
    pub memory: String,

    #[tabled(rename = "Time")]
    pub time: String,

    #[tabled(rename = "Relative Time")]
    pub relative: String,
}

impl ComparisonRow {
    /// Build a row from one timed walker invocation.
    ///
    /// `cpus`/`concurrency` are `None` for the strategies they do not apply
    /// to and render as `n/a`, as does the baseline sweep level.
    pub fn new(
        strategy: &str,
        cpus: Option<usize>,
        concurrency: Option<usize>,
        totals: &StrategyTotals,
        bytes_allocated: u64,
        duration: Duration,
        relative: f64,
    ) -> Self {
        Self {
            strategy: strategy.to_string(),
            cpus: opt_cell(cpus),
            concurrency: opt_cell(concurrency),
            files: format_count(totals.files),
            directories: format_count(totals.dirs),
            objects: format_count(totals.objects),
            size: format_size(totals.bytes, BINARY),
            memory: format_size(bytes_allocated, BINARY),
            time: format_duration(duration),
            relative: format_ratio(relative),
        }
    }
}

fn opt_cell(value: Option<usize>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "n/a".to_string(),
    }
}

/// Print the titled comparison table for one sweep level.
pub fn print_comparison(title: &str, rows: Vec<ComparisonRow>) {
    println!();
    println!("{}", style(title).cyan().bold());
    println!("{}", Table::new(rows).with(Style::psql()));
}

/// Print the paths one strategy saw and the other missed.
pub fn print_mismatches(label: &str, paths: &[std::path::PathBuf]) {
    if paths.is_empty() {
        return;
    }
    println!(
        "{}",
        style(format!("Paths only in {} results:", label)).yellow().bold()
    );
    for path in paths {
        println!("  {}", path.display());
    }
}

/// Print a header at the start of the sweep.
pub fn print_header(root: &Path, cpu_count: usize, multiplier: usize) {
    println!();
    println!(
        "{} {}",
        style("walk-bench").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Root:").bold(), root.display());
    println!("  {} {}", style("CPUs:").bold(), cpu_count);
    println!("  {} {}", style("Multiplier:").bold(), multiplier);
    println!();
}

/// Print a closing line after the sweep.
pub fn print_footer(levels: usize, all_matched: bool) {
    println!();
    if all_matched {
        println!(
            "{}",
            style(format!(
                "Sweep complete: {} levels, path sets matched everywhere",
                levels
            ))
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            style(format!(
                "Sweep complete: {} levels, MISMATCHES detected (see listings above)",
                levels
            ))
            .red()
            .bold()
        );
    }
    println!();
}

/// Format a count with thousands separators.
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Format a wall-clock duration at a precision that suits its magnitude.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs >= 1.0 {
        format!("{:.2}s", secs)
    } else if secs >= 0.001 {
        format!("{:.2}ms", secs * 1000.0)
    } else {
        format!("{}µs", d.as_micros())
    }
}

/// Format a pre-rounded speed ratio, e.g. `2.3x`.
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.1}x", ratio)
}
