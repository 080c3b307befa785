//! Command-line parsing for the download-statistics plotter.
//!
//! The goal of this module is to keep **argument parsing** and **interactive
//! prompting** separate from fetching and plotting.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::Mode;

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "milk-stats", version, about = "Plot daily or cumulative counts from the download endpoints")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive chart window (default).
    Show(RunArgs),
    /// Print the plotted pairs, a summary, and a text plot.
    Print(PrintArgs),
}

/// Named endpoint groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// `/api/user/download`.
    User,
    /// Tournament, tournament log, bracket, bracket log, and bracket archive tables.
    Tournament,
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Endpoint group to fetch.
    #[arg(short = 's', long, value_enum, default_value_t = SourceKind::User)]
    pub source: SourceKind,

    /// Fetch these URLs instead of a named source (repeatable).
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Server base URL (defaults to $MILK_STATS_BASE_URL, then the public server).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Read a saved JSON snapshot instead of fetching.
    #[arg(short = 'f', long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Start date, yyyymmdd (excluded).
    #[arg(long)]
    pub min: Option<i64>,

    /// End date, yyyymmdd (excluded).
    #[arg(long)]
    pub max: Option<i64>,

    /// Daily increase or accumulation (`0`/`1` also accepted).
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<Mode>,

    /// Ask for mode, start date, and end date on the console when not given as flags.
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Save the fetched (merged) series as JSON.
    #[arg(long, value_name = "JSON")]
    pub save_raw: Option<PathBuf>,

    /// Export plotted pairs to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the chart to SVG.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Log at debug level (overridden by $MILK_STATS_LOG).
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Append log lines to this file. `show` logs nowhere else.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Options for `print`.
#[derive(Debug, Args, Clone)]
pub struct PrintArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Skip the text plot.
    #[arg(long)]
    pub no_plot: bool,
}
