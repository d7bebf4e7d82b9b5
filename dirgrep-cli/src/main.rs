use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use crossterm::{cursor, terminal, ExecutableCommand};
use dirgrep::{scan, scan_with_progress, MatchMode, ScanConfig, StatusSnapshot};
use std::io::stdout;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Recursively search a directory tree for matching lines
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text to search for (substring, or a pattern with --regex)
    query: String,

    /// Directory to search
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Treat the query as a regular expression
    #[arg(short, long)]
    regex: bool,

    /// Only scan files whose name matches this wildcard, e.g. "*.rs"
    #[arg(short = 'n', long = "name")]
    name_pattern: Option<String>,

    /// Number of worker threads (default: CPU cores)
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Results file to write (overwritten each run)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suppress the live status table
    #[arg(long)]
    no_status: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<ScanConfig> {
        let config_file = self.config.clone();

        let mut cli_config = ScanConfig::new(self.query, self.root);
        if self.regex {
            cli_config.mode = MatchMode::Regex;
        }
        cli_config.name_pattern = self.name_pattern;
        if let Some(threads) = self.threads {
            cli_config.thread_count = threads;
        }
        if let Some(output) = self.output {
            cli_config.results_path = output;
        }
        cli_config.log_level = self.log_level;

        match config_file {
            Some(path) => {
                let from_file = ScanConfig::load_from(Some(&path))
                    .with_context(|| format!("failed to load config from {}", path.display()))?;
                Ok(from_file.merge_with_cli(cli_config))
            }
            // Local .dirgrep.yaml / global config supply defaults when
            // present; plain CLI values otherwise.
            None if ScanConfig::default_config_exists() => {
                let from_file = ScanConfig::load().context("failed to load configuration")?;
                Ok(from_file.merge_with_cli(cli_config))
            }
            None => Ok(cli_config),
        }
    }
}

fn render_status(snapshot: &StatusSnapshot) {
    let mut out = stdout();
    let _ = out.execute(terminal::Clear(terminal::ClearType::All));
    let _ = out.execute(cursor::MoveTo(0, 0));

    let last_error = match &snapshot.last_error {
        Some(err) => err.red().to_string(),
        None => "none".to_string(),
    };
    println!("----------------------------------------------------");
    println!(
        "| Files Scanned: {}",
        snapshot.files_scanned.to_string().green()
    );
    println!("| Current File:  {}", snapshot.current_file);
    println!(
        "| Total hits:    {}",
        snapshot.total_hits.to_string().cyan()
    );
    println!("|");
    println!("| Last Error:    {last_error}");
    println!("----------------------------------------------------");
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let no_status = cli.no_status;
    let config = cli.into_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();
    tracing::debug!(
        "Effective configuration: {} workers, queue capacity {}",
        config.thread_count,
        config.queue_capacity
    );

    let started = Instant::now();
    let summary = if no_status {
        scan(&config)?
    } else {
        scan_with_progress(&config, render_status)?
    };

    let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
    println!(
        "Scanned {} files, {} hits in {} (results in {})",
        summary.files_scanned,
        summary.total_hits,
        humantime::format_duration(elapsed),
        config.results_path.display()
    );
    if let Some(err) = summary.last_error {
        eprintln!("{} {err}", "Last error:".yellow());
    }
    Ok(())
}
