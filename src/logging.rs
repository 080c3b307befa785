//! Structured logging setup.
//!
//! The filter comes from `MILK_STATS_LOG` (same syntax as `RUST_LOG`); without
//! it only warnings are shown, or debug output with `--verbose`.
//!
//! `print` logs to stderr so logs never mix with printed pairs on stdout.
//! `show` owns the terminal, so its logs go to `--log-file` or nowhere.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::error::AppError;

pub const LOG_ENV: &str = "MILK_STATS_LOG";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

impl LogTarget {
    /// Target for the chart window: never the terminal it draws on.
    pub fn for_chart_window(log_file: Option<&Path>) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path.to_path_buf()),
            None => LogTarget::Discard,
        }
    }

    /// Target for text output: stderr unless a file was asked for.
    pub fn for_text_output(log_file: Option<&Path>) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path.to_path_buf()),
            None => LogTarget::Stderr,
        }
    }

    fn make_writer(&self) -> Result<(BoxMakeWriter, bool), AppError> {
        Ok(match self {
            LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
            LogTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| AppError::file("Failed to open log file", path, e))?;
                (BoxMakeWriter::new(Mutex::new(file)), false)
            }
            LogTarget::Discard => (BoxMakeWriter::new(std::io::sink), false),
        })
    }
}

pub fn init_logging(verbose: bool, target: &LogTarget) -> Result<(), AppError> {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let (writer, ansi) = target.make_writer()?;

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_window_never_logs_to_the_terminal() {
        assert_eq!(LogTarget::for_chart_window(None), LogTarget::Discard);
        assert_eq!(
            LogTarget::for_chart_window(Some(Path::new("run.log"))),
            LogTarget::File("run.log".into())
        );
        assert_eq!(LogTarget::for_text_output(None), LogTarget::Stderr);
    }

    #[test]
    fn unopenable_log_file_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = LogTarget::File(dir.path().join("missing").join("run.log"));
        let err = init_logging(false, &target).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
