//! Per-line query matching.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::{SearchError, SearchResult};

/// Compiled queries are cached by their final regex pattern, so repeated
/// scans with the same query skip recompilation.
static QUERY_CACHE: Lazy<DashMap<String, Arc<Regex>>> = Lazy::new(DashMap::new);

/// How the query string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Substring containment, no metacharacters
    #[default]
    Literal,
    /// Regular expression, search-anywhere-in-line
    Regex,
}

/// Tests raw line bytes against the scan query.
///
/// Both modes compile down to a byte regex: literal mode escapes the query
/// first, so containment semantics fall out of search-anywhere matching.
/// Working on bytes keeps matching binary-safe; lines are never decoded.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    regex: Arc<Regex>,
    mode: MatchMode,
}

impl QueryMatcher {
    /// Compiles the query once for the whole scan. An invalid regex in
    /// regex mode is a fatal `InvalidPattern` setup error.
    pub fn new(query: &str, mode: MatchMode) -> SearchResult<Self> {
        let pattern = match mode {
            MatchMode::Literal => regex::escape(query),
            MatchMode::Regex => query.to_string(),
        };

        let regex = if let Some(entry) = QUERY_CACHE.get(&pattern) {
            Arc::clone(entry.value())
        } else {
            let compiled = Arc::new(
                Regex::new(&pattern)
                    .map_err(|e| SearchError::invalid_pattern(format!("{query}: {e}")))?,
            );
            QUERY_CACHE.insert(pattern, Arc::clone(&compiled));
            compiled
        };

        Ok(Self { regex, mode })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Tests one line (without its trailing newline) for a match.
    pub fn is_match(&self, line: &[u8]) -> bool {
        self.regex.is_match(line)
    }
}
