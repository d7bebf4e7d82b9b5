//! Match records and the append-only results sink.
//!
//! The sink serializes whole per-file blocks under one lock, so output from
//! two workers never interleaves within a block. Block order across files is
//! write order, which is not deterministic with more than one worker.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

use crate::errors::{SearchError, SearchResult};

/// A single matching line within a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// 1-based line number where the match was found
    pub line_number: usize,
    /// Formatted snippet: windowed, highlighted, and sanitized
    pub text: String,
}

/// Append-only destination for per-file result blocks.
pub struct ResultsSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ResultsSink {
    /// Opens (creating or truncating) the results file at `path`.
    pub fn create(path: &Path) -> SearchResult<Self> {
        let file = File::create(path).map_err(|e| SearchError::sink_error(path, e))?;
        Ok(Self::from_writer(Box::new(BufWriter::new(file))))
    }

    /// Wraps an arbitrary writer, mainly for tests.
    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Appends one file's block atomically with respect to other callers:
    ///
    /// ```text
    /// Matches in file: <path> (<N> hits)
    ///     Line <line>: <snippet>
    /// <blank line>
    /// ```
    pub fn write_file_result(&self, path: &Path, matches: &[Match]) -> io::Result<()> {
        debug!(
            "Writing {} matches for {} to results sink",
            matches.len(),
            path.display()
        );
        let mut writer = self.writer.lock().expect("results sink lock poisoned");
        writeln!(
            writer,
            "Matches in file: {} ({} hits)",
            path.display(),
            matches.len()
        )?;
        for m in matches {
            writeln!(writer, "    Line {}: {}", m.line_number, m.text)?;
        }
        writeln!(writer)?;
        writer.flush()
    }
}
