//! Scan coordination: wires the walker, the worker pool, and the status
//! reporter together around the bounded queue and runs a scan to completion.

use std::thread;
use std::time::Duration;
use tracing::{debug, info};

use super::matcher::QueryMatcher;
use super::processor::FileScanner;
use crate::config::ScanConfig;
use crate::errors::{SearchError, SearchResult};
use crate::filters::NameFilter;
use crate::queue::BoundedPathQueue;
use crate::results::ResultsSink;
use crate::status::{SharedStatus, StatusSnapshot};
use crate::walker;

/// Final totals of a completed scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub total_hits: usize,
    /// Most recent non-fatal error observed during the scan, if any.
    pub last_error: Option<String>,
}

/// Runs a scan to completion without progress reporting.
pub fn scan(config: &ScanConfig) -> SearchResult<ScanSummary> {
    scan_with_progress(config, |_| {})
}

/// Runs a scan to completion, invoking `render` with a status snapshot at
/// every poll interval and once more after all threads have joined.
///
/// Fatal setup errors (invalid root, invalid query regex, invalid name
/// pattern, unopenable results file) return before any file is touched.
/// Everything else is soft: recorded into the status, scan continues.
pub fn scan_with_progress<F>(config: &ScanConfig, render: F) -> SearchResult<ScanSummary>
where
    F: Fn(&StatusSnapshot) + Send + Sync,
{
    info!(
        "Starting {:?} scan of {} for {:?}",
        config.mode,
        config.root_path.display(),
        config.query
    );

    if !config.root_path.is_dir() {
        return Err(SearchError::invalid_root(&config.root_path));
    }
    let matcher = QueryMatcher::new(&config.query, config.mode)?;
    let name_filter = config
        .name_pattern
        .as_deref()
        .map(NameFilter::new)
        .transpose()?;

    // The sink is opened (truncating any previous run) only after all
    // patterns compiled, so a fatal pattern error leaves old results alone.
    let sink = ResultsSink::create(&config.results_path)?;

    let status = SharedStatus::new();
    status.reset();
    let queue = BoundedPathQueue::new(config.queue_capacity);
    let worker_count = config.thread_count.get().max(1);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    debug!("Spawning 1 producer, {worker_count} workers, 1 reporter");

    thread::scope(|scope| {
        let producer = scope.spawn(|| {
            walker::produce(&config.root_path, name_filter.as_ref(), &queue, &status);
        });

        let mut workers = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            workers.push(scope.spawn(|| {
                let scanner = FileScanner::new(
                    &matcher,
                    &config.query,
                    config.snippet_window,
                    &status,
                    &sink,
                );
                while let Some(path) = queue.pop() {
                    status.start_file(&path);
                    if let Err(err) = scanner.scan_file(&path) {
                        status.record_error(err.to_string());
                    }
                }
            }));
        }

        let reporter = scope.spawn(|| loop {
            thread::sleep(poll_interval);
            let done = queue.is_finished() && queue.is_empty();
            render(&status.snapshot());
            if done {
                break;
            }
        });

        // Join order: producer, workers, reporter. After these joins no
        // thread writes to the status or the sink.
        producer.join().expect("producer thread panicked");
        for worker in workers {
            worker.join().expect("worker thread panicked");
        }
        reporter.join().expect("reporter thread panicked");
    });

    let snapshot = status.snapshot();
    render(&snapshot);
    info!(
        "Scan complete: {} files scanned, {} hits",
        snapshot.files_scanned, snapshot.total_hits
    );

    Ok(ScanSummary {
        files_scanned: snapshot.files_scanned,
        total_hits: snapshot.total_hits,
        last_error: snapshot.last_error,
    })
}
