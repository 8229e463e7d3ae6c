//! Logging setup via `tracing` and `tracing-subscriber`.
//!
//! Log levels follow the validator's taxonomy: `error` for fatal problems,
//! `warn` for footing mismatches and missing references, `info` for run
//! summaries, `debug` for per-row placement and year detection.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output with colors.
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

/// Configuration for the global subscriber.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// When set, `RUST_LOG` takes precedence over `level_filter`.
    pub use_env_filter: bool,
    pub format: LogFormat,
    pub log_file: Option<PathBuf>,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            format: LogFormat::default(),
            log_file: None,
            with_ansi: io::stderr().is_terminal(),
        }
    }
}

/// Initialize the global tracing subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error when the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let filter = build_filter(config);
    match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            install(config, filter, Arc::new(file), false);
        }
        None => install(config, filter, io::stderr, config.with_ansi),
    }
    Ok(())
}

fn install<W>(config: &LogConfig, filter: EnvFilter, writer: W, ansi: bool)
where
    W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_writer(writer).with_target(false))
                .init();
        }
        LogFormat::Compact => {
            registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_ansi(ansi)
                        .with_target(false)
                        .without_time(),
                )
                .init();
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(ansi)
                        .with_target(false)
                        .without_time(),
                )
                .init();
        }
    }
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(config.level_filter.to_string().to_lowercase())
}
