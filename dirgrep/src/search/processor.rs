//! Per-file scanning: stream lines, collect matches, flush one result block.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

use super::formatter;
use super::matcher::QueryMatcher;
use crate::errors::{SearchError, SearchResult};
use crate::results::{Match, ResultsSink};
use crate::status::SharedStatus;

const BUFFER_CAPACITY: usize = 65536;

/// Scans individual files against a compiled query. One instance is shared
/// read-only state for a worker; all mutation goes through the shared status
/// and the results sink.
pub struct FileScanner<'a> {
    matcher: &'a QueryMatcher,
    query: &'a str,
    snippet_window: usize,
    status: &'a SharedStatus,
    sink: &'a ResultsSink,
}

impl<'a> FileScanner<'a> {
    pub fn new(
        matcher: &'a QueryMatcher,
        query: &'a str,
        snippet_window: usize,
        status: &'a SharedStatus,
        sink: &'a ResultsSink,
    ) -> Self {
        Self {
            matcher,
            query,
            snippet_window,
            status,
            sink,
        }
    }

    /// Streams one file line by line, recording hits as they are found and
    /// appending a single result block if any line matched.
    ///
    /// Errors are returned to the caller to be recorded in the shared
    /// status; they never abort the scan. A file that fails to open or read
    /// is skipped without counting as scanned.
    pub fn scan_file(&self, path: &Path) -> SearchResult<()> {
        trace!("Scanning file: {}", path.display());

        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SearchError::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => SearchError::permission_denied(path),
            _ => SearchError::IoError(e),
        })?;
        let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);

        let mut matches = Vec::new();
        let mut line = Vec::new();
        let mut line_number = 1usize;
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(SearchError::IoError)?;
            if read == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }

            if self.matcher.is_match(&line) {
                let text =
                    formatter::format_snippet(&line, self.query.as_bytes(), self.snippet_window);
                matches.push(Match { line_number, text });
                self.status.record_hit();
            }
            line_number += 1;
        }

        self.status.file_scanned();

        // Zero-match files leave no trace in the results file.
        if !matches.is_empty() {
            self.sink
                .write_file_result(path, &matches)
                .map_err(SearchError::IoError)?;
        }
        Ok(())
    }
}
