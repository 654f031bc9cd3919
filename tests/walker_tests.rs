//! Integration tests for walk-bench
//!
//! Every test builds its own fixture tree under a tempdir, so the suite
//! never depends on the contents of the working directory. The counting
//! allocator is installed in this binary so allocation accounting is
//! exercised end to end.

use std::fs;
use std::path::Path;
use walk_bench::bench::BenchRunner;
use walk_bench::config::BenchConfig;
use walk_bench::mem::{self, CountingAllocator};
use walk_bench::scan::{compare_scans, ParallelWalker, SequentialWalker};
use walk_bench::ScanError;

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

/// Build a small three-level tree. Returns the number of entries created
/// beneath the root (not counting the root itself).
fn build_fixture(root: &Path) -> usize {
    fs::create_dir(root.join("alpha")).unwrap();
    fs::write(root.join("alpha/a0.dat"), vec![0u8; 10]).unwrap();
    fs::write(root.join("alpha/a1.dat"), vec![0u8; 20]).unwrap();
    fs::create_dir(root.join("alpha/nested")).unwrap();
    fs::write(root.join("alpha/nested/n0.dat"), vec![0u8; 30]).unwrap();
    fs::create_dir(root.join("beta")).unwrap();
    fs::write(root.join("beta/b0.dat"), vec![0u8; 5]).unwrap();
    fs::create_dir(root.join("gamma")).unwrap();
    fs::write(root.join("top.txt"), vec![0u8; 40]).unwrap();
    9
}

#[test]
fn test_set_equivalence_across_concurrency_levels() {
    let dir = tempfile::tempdir().unwrap();
    build_fixture(dir.path());

    let sequential = SequentialWalker::new(dir.path()).run().unwrap();

    for concurrency in 1..=(num_cpus::get() * 2) {
        let concurrent = ParallelWalker::new(dir.path(), concurrency).run().unwrap();
        let cmp = compare_scans(&sequential, &concurrent);
        assert!(
            cmp.paths_match(),
            "path sets diverged at concurrency {}: {:?} / {:?}",
            concurrency,
            cmp.only_in_sequential,
            cmp.only_in_parallel
        );
    }
}

#[test]
fn test_count_conservation() {
    let dir = tempfile::tempdir().unwrap();
    let created = build_fixture(dir.path());

    let sequential = SequentialWalker::new(dir.path()).run().unwrap();
    let concurrent = ParallelWalker::new(dir.path(), 4).run().unwrap();
    let cmp = compare_scans(&sequential, &concurrent);

    // Every created entry plus the root itself, on both sides.
    assert_eq!(cmp.sequential.objects as usize, created + 1);
    assert_eq!(cmp.parallel.objects as usize, created + 1);
    assert_eq!(cmp.sequential.files, 5);
    assert_eq!(cmp.sequential.dirs, 5);
    assert_eq!(cmp.sequential.bytes, 105);
    assert_eq!(cmp.parallel.bytes, 105);
}

#[test]
fn test_degenerate_pool_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    build_fixture(dir.path());

    let sequential = SequentialWalker::new(dir.path()).run().unwrap();
    let concurrent = ParallelWalker::new(dir.path(), 1).run().unwrap();
    let cmp = compare_scans(&sequential, &concurrent);

    assert!(cmp.paths_match());
    assert_eq!(cmp.sequential, cmp.parallel);
}

#[test]
fn test_empty_subdirectory_yields_two_records() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("hollow")).unwrap();

    let sequential = SequentialWalker::new(dir.path()).run().unwrap();
    let concurrent = ParallelWalker::new(dir.path(), 4).run().unwrap();
    let cmp = compare_scans(&sequential, &concurrent);

    assert!(cmp.paths_match());
    assert_eq!(cmp.parallel.objects, 2);
    assert_eq!(cmp.parallel.files, 0);
    assert_eq!(cmp.parallel.dirs, 2);
}

#[test]
fn test_task_count_equals_directory_count() {
    let dir = tempfile::tempdir().unwrap();
    build_fixture(dir.path());

    let walker = ParallelWalker::new(dir.path(), 4);
    let entries = walker.run().unwrap();

    let dirs = entries.iter().filter(|e| e.is_dir).count() as u64;
    assert_eq!(walker.tasks_spawned(), dirs);
}

#[test]
fn test_idempotent_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    build_fixture(dir.path());

    let seq_first = SequentialWalker::new(dir.path()).run().unwrap();
    let seq_second = SequentialWalker::new(dir.path()).run().unwrap();
    let par_first = ParallelWalker::new(dir.path(), 4).run().unwrap();
    let par_second = ParallelWalker::new(dir.path(), 4).run().unwrap();

    let first = compare_scans(&seq_first, &par_first);
    let second = compare_scans(&seq_second, &par_second);

    assert_eq!(first.sequential, second.sequential);
    assert_eq!(first.parallel, second.parallel);
}

#[test]
fn test_max_depth_parity() {
    let dir = tempfile::tempdir().unwrap();
    build_fixture(dir.path());

    for depth in [0, 1, 2] {
        let sequential = SequentialWalker::new(dir.path())
            .max_depth(Some(depth))
            .run()
            .unwrap();
        let concurrent = ParallelWalker::new(dir.path(), 4)
            .max_depth(Some(depth))
            .run()
            .unwrap();

        let cmp = compare_scans(&sequential, &concurrent);
        assert!(
            cmp.paths_match(),
            "depth {} diverged: {:?} / {:?}",
            depth,
            cmp.only_in_sequential,
            cmp.only_in_parallel
        );
    }
}

#[cfg(unix)]
#[test]
fn test_error_short_circuit_on_unreadable_directory() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    build_fixture(dir.path());

    let locked = dir.path().join("beta");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged processes ignore permission bits; nothing to observe then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let seq_err = SequentialWalker::new(dir.path()).run().unwrap_err();
    assert!(matches!(seq_err, ScanError::ReadDir { .. }));

    let par_err = ParallelWalker::new(dir.path(), 4).run().unwrap_err();
    assert!(matches!(par_err, ScanError::ReadDir { .. }));

    // The driver treats any walker error as fatal to the whole run.
    let config = BenchConfig {
        root: dir.path().to_path_buf(),
        cpu_count: 2,
        multiplier: 1,
        max_depth: None,
        verbose: false,
    };
    assert!(BenchRunner::new(config).run().is_err());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_allocation_counters_advance() {
    let before = mem::snapshot();
    let buffer = std::hint::black_box(vec![0u8; 1 << 20]);
    let after = mem::snapshot();

    assert!(after.bytes_since(&before) >= buffer.len() as u64);
}
