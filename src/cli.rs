//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most options can also be provided via environment variables, and the
//! header/timing options via a YAML config file (see [`crate::config`]).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format of the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Markdown,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Markdown report in ./reports
/// language_rankings
///
/// # JSON report, shorter per-source timeout
/// language_rankings -f json -o ./out --timeout-secs 20
///
/// # Custom header from a config file
/// language_rankings -c rankings.yaml --no-logo
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the report is written to
    #[arg(short, long, default_value = "reports")]
    pub output_dir: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
    pub format: Format,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-source navigation and readiness timeout, in seconds
    #[arg(long, env = "RANKINGS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Interval between "still running" log lines, in seconds
    #[arg(long, env = "RANKINGS_HEARTBEAT_SECS")]
    pub heartbeat_secs: Option<u64>,

    /// Report title
    #[arg(long)]
    pub title: Option<String>,

    /// Report subtitle
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Hide the logo in the report header
    #[arg(long)]
    pub no_logo: bool,

    /// Hide the generation date in the report header
    #[arg(long)]
    pub no_date: bool,

    /// Logo image referenced by the Markdown header
    #[arg(long, default_value = "assets/logo.png")]
    pub logo_path: String,

    /// Chrome/Chromium executable; auto-detected when omitted
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,
}
