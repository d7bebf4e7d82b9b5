//! Scan configuration with optional file-based layering.
//!
//! Configuration can come from, in order of precedence:
//! 1. CLI arguments (merged in via [`ScanConfig::merge_with_cli`])
//! 2. A custom config file passed explicitly
//! 3. A local `.dirgrep.yaml` in the current directory
//! 4. A global `$CONFIG_DIR/dirgrep/config.yaml`

use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::queue::DEFAULT_QUEUE_CAPACITY;
use crate::search::formatter::DEFAULT_SNIPPET_WINDOW;
use crate::search::matcher::MatchMode;

/// Everything a scan needs to run. Immutable once the scan starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// The query text: a substring in literal mode, a pattern in regex mode.
    /// Optional in config files, which usually only supply defaults; the
    /// caller merges the real query in via [`ScanConfig::merge_with_cli`].
    #[serde(default)]
    pub query: String,

    /// How the query is interpreted
    #[serde(default)]
    pub mode: MatchMode,

    /// Root directory to scan recursively
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Optional wildcard filename filter, e.g. "*.rs" (case-insensitive)
    #[serde(default)]
    pub name_pattern: Option<String>,

    /// Number of scanner workers; defaults to the number of CPU cores
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Maximum pending paths held in the work queue
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Snippet window width in characters
    #[serde(default = "default_snippet_window")]
    pub snippet_window: usize,

    /// Where the results file is written (truncated each run)
    #[serde(default = "default_results_path")]
    pub results_path: PathBuf,

    /// Status reporter poll interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get().max(1)).unwrap()
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_snippet_window() -> usize {
    DEFAULT_SNIPPET_WINDOW
}

fn default_results_path() -> PathBuf {
    PathBuf::from("search_results.txt")
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl ScanConfig {
    /// A config with the given query and root and all other fields at their
    /// defaults.
    pub fn new(query: impl Into<String>, root_path: impl Into<PathBuf>) -> Self {
        Self {
            query: query.into(),
            mode: MatchMode::default(),
            root_path: root_path.into(),
            name_pattern: None,
            thread_count: default_thread_count(),
            queue_capacity: default_queue_capacity(),
            snippet_window: default_snippet_window(),
            results_path: default_results_path(),
            poll_interval_ms: default_poll_interval_ms(),
            log_level: default_log_level(),
        }
    }

    /// The default config file locations, lowest precedence first.
    fn default_config_files() -> Vec<PathBuf> {
        [
            // Global config
            dirs::config_dir().map(|p| p.join("dirgrep/config.yaml")),
            // Local config
            Some(PathBuf::from(".dirgrep.yaml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Whether any of the default config file locations exists. Callers
    /// without an explicit config path can skip [`ScanConfig::load`]
    /// entirely when this is false.
    pub fn default_config_exists() -> bool {
        Self::default_config_files().iter().any(|p| p.exists())
    }

    /// Loads configuration from the default locations.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, layering an optional explicit file on top of the
    /// default locations. The default files are skipped when absent; an
    /// explicit file that does not exist is an error.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        for path in Self::default_config_files() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments over configuration-file values. CLI values win
    /// wherever they differ from the CLI defaults.
    pub fn merge_with_cli(mut self, cli: ScanConfig) -> Self {
        if !cli.query.is_empty() {
            self.query = cli.query;
        }
        if cli.mode != MatchMode::default() {
            self.mode = cli.mode;
        }
        if cli.root_path != PathBuf::from(".") {
            self.root_path = cli.root_path;
        }
        if cli.name_pattern.is_some() {
            self.name_pattern = cli.name_pattern;
        }
        if cli.thread_count != default_thread_count() {
            self.thread_count = cli.thread_count;
        }
        if cli.queue_capacity != default_queue_capacity() {
            self.queue_capacity = cli.queue_capacity;
        }
        if cli.snippet_window != default_snippet_window() {
            self.snippet_window = cli.snippet_window;
        }
        if cli.results_path != default_results_path() {
            self.results_path = cli.results_path;
        }
        if cli.poll_interval_ms != default_poll_interval_ms() {
            self.poll_interval_ms = cli.poll_interval_ms;
        }
        if cli.log_level != default_log_level() {
            self.log_level = cli.log_level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let config_content = r#"
            query: "needle"
            mode: "regex"
            root_path: "src"
            name_pattern: "*.rs"
            thread_count: 4
            queue_capacity: 100
            snippet_window: 80
            results_path: "out.txt"
            poll_interval_ms: 250
            log_level: "debug"
        "#;

        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = ScanConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.query, "needle");
        assert_eq!(config.mode, MatchMode::Regex);
        assert_eq!(config.root_path, PathBuf::from("src"));
        assert_eq!(config.name_pattern, Some("*.rs".to_string()));
        assert_eq!(config.thread_count, NonZeroUsize::new(4).unwrap());
        assert_eq!(config.queue_capacity, 100);
        assert_eq!(config.snippet_window, 80);
        assert_eq!(config.results_path, PathBuf::from("out.txt"));
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_default_values() {
        let config_content = r#"
            query: "needle"
            root_path: "."
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = ScanConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.mode, MatchMode::Literal);
        assert_eq!(config.name_pattern, None);
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.snippet_window, DEFAULT_SNIPPET_WINDOW);
        assert_eq!(config.results_path, PathBuf::from("search_results.txt"));
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.log_level, "warn");
        assert_eq!(
            config.thread_count,
            NonZeroUsize::new(num_cpus::get().max(1)).unwrap()
        );
    }

    #[test]
    fn test_merge_with_cli() {
        let mut from_file = ScanConfig::new("needle", "src");
        from_file.name_pattern = Some("*.rs".to_string());
        from_file.log_level = "info".to_string();

        let mut cli = ScanConfig::new("other", "tests");
        cli.mode = MatchMode::Regex;
        cli.thread_count = NonZeroUsize::new(8).unwrap();

        let merged = from_file.merge_with_cli(cli);
        assert_eq!(merged.query, "other"); // CLI value
        assert_eq!(merged.mode, MatchMode::Regex); // CLI value
        assert_eq!(merged.root_path, PathBuf::from("tests")); // CLI value
        assert_eq!(merged.name_pattern, Some("*.rs".to_string())); // file value
        assert_eq!(merged.thread_count, NonZeroUsize::new(8).unwrap()); // CLI value
        assert_eq!(merged.log_level, "info"); // file value (CLI default)
    }

    #[test]
    fn test_invalid_config() {
        let config_content = r#"
            query: []  # should be a string
            thread_count: "invalid"  # should be a number
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        assert!(ScanConfig::load_from(Some(&config_path)).is_err());
    }

    #[test]
    fn test_partial_config_file_supplies_defaults_only() {
        // A typical .dirgrep.yaml holds tuning knobs but no query; the
        // query and root arrive later via merge_with_cli.
        let config_content = r#"
            name_pattern: "*.txt"
            thread_count: 2
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let from_file = ScanConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(from_file.query, "");
        assert_eq!(from_file.root_path, PathBuf::from("."));
        assert_eq!(from_file.name_pattern, Some("*.txt".to_string()));

        let merged = from_file.merge_with_cli(ScanConfig::new("needle", "src"));
        assert_eq!(merged.query, "needle");
        assert_eq!(merged.root_path, PathBuf::from("src"));
        assert_eq!(merged.name_pattern, Some("*.txt".to_string()));
        assert_eq!(merged.thread_count, NonZeroUsize::new(2).unwrap());
    }

    #[test]
    fn test_explicit_nonexistent_file_is_an_error() {
        let result = ScanConfig::load_from(Some(Path::new("nonexistent.yaml")));
        assert!(result.is_err());
    }
}
