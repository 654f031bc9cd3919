//! Error types for walk-bench
//!
//! The traversal layer is fail-fast: the benchmark measures throughput, not
//! resilience, so every filesystem error aborts the walker invocation that
//! hit it. Among concurrent tasks only the first error is retained; later
//! ones are discarded.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the benchmark application
#[derive(Error, Debug)]
pub enum BenchError {
    /// Traversal errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Configuration and CLI errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Traversal errors
///
/// Any of these aborts the walker invocation that produced it; there is no
/// retry and no partial result.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Root path missing
    #[error("Root path not found: '{path}'")]
    RootNotFound { path: PathBuf },

    /// Root path exists but cannot be stat'd
    #[error("Cannot stat root '{path}': {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory's contents could not be enumerated
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry's metadata could not be read
    #[error("Failed to read metadata for '{path}': {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The scan thread pool could not be built
    #[error("Failed to build scan thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    /// Classify a failed stat of the root path.
    pub(crate) fn root(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ScanError::RootNotFound { path }
        } else {
            ScanError::RootUnreadable { path, source }
        }
    }
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid concurrency multiplier
    #[error("Invalid concurrency multiplier {value}: must be between 1 and {max}")]
    InvalidMultiplier { value: usize, max: usize },

    /// Root path does not exist
    #[error("Root path does not exist: '{path}'")]
    RootNotFound { path: PathBuf },

    /// Root path is not a directory
    #[error("Root path is not a directory: '{path}'")]
    NotADirectory { path: PathBuf },
}

/// Result type alias for BenchError
pub type Result<T> = std::result::Result<T, BenchError>;

/// Result type alias for ScanError
pub type ScanResult<T> = std::result::Result<T, ScanError>;
