//! Concurrent recursive line search over a directory tree.
//!
//! A single producer walks the tree and feeds file paths through a bounded
//! queue to a pool of scanner workers; matches are appended to a results
//! file in per-file blocks while a reporter thread snapshots live progress.

pub mod config;
pub mod errors;
pub mod filters;
pub mod queue;
pub mod results;
pub mod search;
pub mod status;
pub mod walker;

pub use config::ScanConfig;
pub use errors::{SearchError, SearchResult};
pub use results::Match;
pub use search::{scan, scan_with_progress, MatchMode, ScanSummary};
pub use status::{SharedStatus, StatusSnapshot};
