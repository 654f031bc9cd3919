//! Benchmarks for walk-bench
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs;
use std::path::Path;
use walk_bench::scan::{ParallelWalker, SequentialWalker};

/// Lay down a wide, shallow tree for the walkers to chew on.
fn populate(root: &Path, dirs: usize, files_per_dir: usize) {
    for d in 0..dirs {
        let sub = root.join(format!("dir-{:03}", d));
        fs::create_dir(&sub).unwrap();
        for f in 0..files_per_dir {
            fs::write(sub.join(format!("file-{:03}.dat", f)), [0u8; 64]).unwrap();
        }
    }
}

fn benchmark_walkers(c: &mut Criterion) {
    let fixture = tempfile::tempdir().unwrap();
    populate(fixture.path(), 32, 16);

    let mut group = c.benchmark_group("walks");
    group.sample_size(20);

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let entries = SequentialWalker::new(fixture.path()).run().unwrap();
            black_box(entries);
        })
    });

    for concurrency in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("concurrent", concurrency),
            &concurrency,
            |b, &concurrency| {
                b.iter(|| {
                    let entries = ParallelWalker::new(fixture.path(), concurrency)
                        .run()
                        .unwrap();
                    black_box(entries);
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_walkers);
criterion_main!(benches);
