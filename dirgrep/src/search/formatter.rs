//! Snippet extraction, match highlighting, and output sanitization.
//!
//! A matched line is cut down to a bounded window around the first literal
//! occurrence of the query, the match is wrapped in highlight markers, and
//! the result is escaped so it is always safe for a plain terminal or text
//! file. Regex matches are highlighted through the same literal lookup: if
//! the query text itself never appears in the line, the line is only
//! length-capped.

use std::fmt::Write;

/// Default snippet window in characters, context split evenly around the match.
pub const DEFAULT_SNIPPET_WINDOW: usize = 180;

/// Inserted immediately before the matched substring.
pub const HIGHLIGHT_START: &str = ">>>";
/// Inserted immediately after the matched substring.
pub const HIGHLIGHT_END: &str = "<<<";

const TRUNCATION_SUFFIX: &str = "...(truncated)";
const ELLIPSIS_LEFT: &str = "... ";
const ELLIPSIS_RIGHT: &str = " ...";

/// Windows, highlights, and sanitizes one matched line in one go.
pub fn format_snippet(line: &[u8], query: &[u8], window: usize) -> String {
    sanitize(&truncate_and_highlight(line, query, window))
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Extracts a window of at most `window` context characters around the first
/// literal occurrence of `query`, wrapping the match in highlight markers
/// and marking truncation with ellipses.
///
/// Without a literal occurrence the line is returned unhighlighted, capped
/// at `window` bytes with a truncation suffix if it was longer.
pub fn truncate_and_highlight(line: &[u8], query: &[u8], window: usize) -> Vec<u8> {
    let Some(pos) = find_subslice(line, query) else {
        if line.len() > window {
            let mut out = line[..window].to_vec();
            out.extend_from_slice(TRUNCATION_SUFFIX.as_bytes());
            return out;
        }
        return line.to_vec();
    };

    let radius = window / 2;
    let start = pos.saturating_sub(radius);
    let end = (pos + query.len() + radius).min(line.len());

    // Marker positions are relative to the snippet, not the original line.
    let snippet = &line[start..end];
    let match_pos = pos - start;
    let match_end = match_pos + query.len();

    let mut out = Vec::with_capacity(
        snippet.len()
            + HIGHLIGHT_START.len()
            + HIGHLIGHT_END.len()
            + ELLIPSIS_LEFT.len()
            + ELLIPSIS_RIGHT.len(),
    );
    if start > 0 {
        out.extend_from_slice(ELLIPSIS_LEFT.as_bytes());
    }
    out.extend_from_slice(&snippet[..match_pos]);
    out.extend_from_slice(HIGHLIGHT_START.as_bytes());
    out.extend_from_slice(&snippet[match_pos..match_end]);
    out.extend_from_slice(HIGHLIGHT_END.as_bytes());
    out.extend_from_slice(&snippet[match_end..]);
    if end < line.len() {
        out.extend_from_slice(ELLIPSIS_RIGHT.as_bytes());
    }
    out
}

/// Escapes every byte outside printable ASCII (32-126), except tab, as a
/// two-hex-digit `\xNN` sequence.
pub fn sanitize(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if (32..127).contains(&b) || b == b'\t' {
            out.push(b as char);
        } else {
            let _ = write!(out, "\\x{b:02x}");
        }
    }
    out
}
