//! Tracing setup: stderr plus an optional daily log file.

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Name of the log file for a given day.
#[must_use]
pub fn log_file_name(day: NaiveDate) -> String {
    format!("router_ip_reset_{}.log", day.format("%Y%m%d"))
}

/// Stderr filter used when `RUST_LOG` is unset
#[must_use]
pub const fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,router_client=debug,router4g_cli=debug"
    } else {
        "warn,router_client=info,router4g_cli=info"
    }
}

/// Install the global subscriber.
///
/// Stderr honors `RUST_LOG` and otherwise shows the reset workflow at info
/// level (debug with `verbose`). The log file, when a directory is given, always records
/// the reset workflow at info level. Returns the log file path.
pub fn init(verbose: bool, log_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let (file_layer, file_path) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;
            let path = dir.join(log_file_name(Local::now().date_naive()));
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Could not open log file {}", path.display()))?;

            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(
                    Targets::new()
                        .with_target("router_client", Level::INFO)
                        .with_target("router4g_cli", Level::INFO),
                );
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(file_path)
}
