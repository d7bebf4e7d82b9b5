use criterion::{criterion_group, criterion_main, Criterion};
use dirgrep::{scan, MatchMode, ScanConfig};
use std::fs;
use std::num::NonZeroUsize;
use tempfile::TempDir;

fn create_test_tree(file_count: usize, lines_per_file: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    for i in 0..file_count {
        let mut body = String::new();
        for j in 0..lines_per_file {
            body.push_str(&format!("Line {j} of file {i}: some ordinary text\n"));
            if j % 10 == 0 {
                body.push_str(&format!("TODO item {j} in file {i}\n"));
            }
        }
        fs::write(dir.path().join(format!("file_{i}.txt")), body).unwrap();
    }
    dir
}

fn bench_config(query: &str, tree: &TempDir, out: &TempDir) -> ScanConfig {
    let mut config = ScanConfig::new(query, tree.path());
    config.results_path = out.path().join("results.txt");
    config.poll_interval_ms = 10;
    config
}

fn bench_literal_scan(c: &mut Criterion) {
    let tree = create_test_tree(100, 100);
    let out = TempDir::new().unwrap();
    let config = bench_config("TODO", &tree, &out);

    c.bench_function("literal_scan_100_files", |b| {
        b.iter(|| scan(&config).unwrap())
    });
}

fn bench_regex_scan(c: &mut Criterion) {
    let tree = create_test_tree(100, 100);
    let out = TempDir::new().unwrap();
    let mut config = bench_config(r"TODO item \d+", &tree, &out);
    config.mode = MatchMode::Regex;

    c.bench_function("regex_scan_100_files", |b| {
        b.iter(|| scan(&config).unwrap())
    });
}

fn bench_worker_counts(c: &mut Criterion) {
    let tree = create_test_tree(200, 200);
    let out = TempDir::new().unwrap();
    let mut group = c.benchmark_group("worker_counts");

    for workers in [1usize, 2, 4] {
        let mut config = bench_config("TODO", &tree, &out);
        config.thread_count = NonZeroUsize::new(workers).unwrap();
        group.bench_function(format!("workers_{workers}"), |b| {
            b.iter(|| scan(&config).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_literal_scan,
    bench_regex_scan,
    bench_worker_counts
);
criterion_main!(benches);
