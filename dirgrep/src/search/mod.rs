//! The scanning engine: query matching, snippet formatting, per-file
//! processing, and the coordinator that runs them across a worker pool.

pub mod engine;
pub mod formatter;
pub mod matcher;
pub mod processor;

pub use engine::{scan, scan_with_progress, ScanSummary};
pub use matcher::{MatchMode, QueryMatcher};
pub use processor::FileScanner;
