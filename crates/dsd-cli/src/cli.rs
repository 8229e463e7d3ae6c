//! CLI argument definitions for the footing validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dsd-footing",
    version,
    about = "DSD footing validator - check financial-statement totals",
    long_about = "Validate a DSD financial-statement extract: rebuild the account\n\
                  hierarchy from indentation, foot every total against its line\n\
                  items per reporting year, and check the cross-total identities\n\
                  (e.g. Assets = Liabilities + Equity)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check the footing of an extract.
    Check(CheckArgs),

    /// Print the active footing rule table.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the extract CSV (the D210000 sheet exported as a plain grid).
    #[arg(value_name = "EXTRACT")]
    pub extract: PathBuf,

    /// Rule-set JSON replacing the built-in D210000 taxonomy.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Result rendering on stdout.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Also write the full JSON report to a file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Zero-based row index of the year header (default: 4).
    #[arg(long = "year-header-row", value_name = "ROW")]
    pub year_header_row: Option<usize>,

    /// Zero-based row index of the first account row (default: 5).
    #[arg(long = "data-start-row", value_name = "ROW")]
    pub data_start_row: Option<usize>,

    /// Zero-based row index of the last account row, inclusive (default: 52).
    #[arg(long = "data-end-row", value_name = "ROW")]
    pub data_end_row: Option<usize>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Rule-set JSON replacing the built-in D210000 taxonomy.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    /// Per-year summary tables.
    Table,
    /// The full report as JSON on stdout.
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
