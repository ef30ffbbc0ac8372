//! Console and daily-file logging.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use once_cell::sync::OnceCell;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_FILE: OnceCell<PathBuf> = OnceCell::new();

/// Name of the log file for `date`, e.g. `application_logs_20250101.log`.
pub fn log_file_name(date: NaiveDate) -> String {
    format!("application_logs_{}.log", date.format("%Y%m%d"))
}

/// Install the global subscriber: `RUST_LOG` filter (default `info`),
/// a stderr layer and an append-only file layer in `log_dir`.
///
/// Only the first call does anything; later calls return the file chosen
/// by the first one.
pub fn setup_logging(log_dir: &Path) -> anyhow::Result<PathBuf> {
    LOG_FILE.get_or_try_init(|| install(log_dir)).cloned()
}

/// File the subscriber writes to, if logging was set up.
pub fn log_file() -> Option<&'static Path> {
    LOG_FILE.get().map(PathBuf::as_path)
}

fn install(log_dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Cannot create log directory {}", log_dir.display()))?;

    let path = log_dir.join(log_file_name(Local::now().date_naive()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(Arc::new(file)).with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(log_file_name(date), "application_logs_20250307.log");
    }
}
