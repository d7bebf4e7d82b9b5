//! Filename filtering with glob-style wildcards.

use regex::{Regex, RegexBuilder};

use crate::errors::{SearchError, SearchResult};

/// Case-insensitive filename predicate compiled from a wildcard pattern.
///
/// `*` matches zero or more characters, `?` matches exactly one, every other
/// character matches literally. The whole filename must match, not a
/// substring: `*.txt` matches `notes.txt` but not `notes.txt.bak`.
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: String,
    regex: Regex,
}

impl NameFilter {
    /// Compiles a wildcard pattern; fails with `InvalidPattern` if the
    /// translated regex cannot be built.
    pub fn new(pattern: &str) -> SearchResult<Self> {
        let regex = RegexBuilder::new(&wildcard_to_regex(pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::invalid_pattern(format!("{pattern}: {e}")))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The original wildcard pattern this filter was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Tests a bare filename (not a full path) against the pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }
}

/// Translates a wildcard pattern into an anchored regex string.
pub fn wildcard_to_regex(wildcard: &str) -> String {
    let mut out = String::with_capacity(wildcard.len() * 2 + 2);
    out.push('^');
    for c in wildcard.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    out.push('$');
    out
}
