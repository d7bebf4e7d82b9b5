//! Shared live-progress state for an in-flight scan.
//!
//! All fields live behind one exclusive lock; writers (walker, workers) and
//! readers (status reporter) take the same lock, and it is never held across
//! I/O. The `current_file`/`file_hits` pair is best-effort: with several
//! workers in flight the displayed file may not be the one whose hits are
//! being counted.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

#[derive(Debug, Default)]
struct StatusData {
    files_scanned: usize,
    current_file: String,
    file_hits: usize,
    total_hits: usize,
    last_error: Option<String>,
}

/// Owned point-in-time copy of the scan status, safe to render without
/// holding any lock.
#[derive(Debug, Clone, Default)]
pub struct StatusSnapshot {
    pub files_scanned: usize,
    pub current_file: String,
    pub file_hits: usize,
    pub total_hits: usize,
    /// Most recent non-fatal error, if any. Older errors are overwritten.
    pub last_error: Option<String>,
}

/// Cloneable handle to the shared scan status.
#[derive(Debug, Clone, Default)]
pub struct SharedStatus {
    inner: Arc<Mutex<StatusData>>,
}

impl SharedStatus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StatusData> {
        self.inner.lock().expect("status lock poisoned")
    }

    /// Clears all counters and fields back to their initial values.
    pub fn reset(&self) {
        *self.lock() = StatusData::default();
    }

    /// Notes the file a worker is about to scan and resets its hit counter.
    pub fn start_file(&self, path: &Path) {
        let mut data = self.lock();
        data.current_file = path.display().to_string();
        data.file_hits = 0;
    }

    /// Records one matching line: bumps the per-file and cumulative counters
    /// under a single lock acquisition.
    pub fn record_hit(&self) {
        let mut data = self.lock();
        data.file_hits += 1;
        data.total_hits += 1;
    }

    /// Records that one file has been fully processed.
    pub fn file_scanned(&self) {
        self.lock().files_scanned += 1;
    }

    /// Retains `message` as the most recent error, replacing any older one.
    pub fn record_error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.lock().last_error = Some(message);
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        let data = self.lock();
        StatusSnapshot {
            files_scanned: data.files_scanned,
            current_file: data.current_file.clone(),
            file_hits: data.file_hits,
            total_hits: data.total_hits,
            last_error: data.last_error.clone(),
        }
    }
}
