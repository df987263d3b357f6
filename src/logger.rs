//! Debug logging support for sug
//!
//! When debug mode is enabled via config, operations are logged to a
//! file, ~/.sug/sug.log unless the config overrides the location. A
//! logging failure never breaks normal operation; it degrades to no
//! logging.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use crate::config::Config;

/// Initialize the debug logging system.
///
/// Returns the path to the log file, or None if logging is not enabled.
pub fn init_debug_logging(config: &Config) -> Result<Option<PathBuf>> {
    if !config.logging.debug {
        return Ok(None);
    }

    let log_path = match &config.logging.path {
        Some(path) => path.clone(),
        None => default_log_path()?,
    };

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory: {}", parent.display()))?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file: {}", log_path.display()))?;

    let subscriber = registry()
        .with(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(EnvFilter::new("sug=debug"));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))?;

    Ok(Some(log_path))
}

fn default_log_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home_dir.join(".sug").join("sug.log"))
}
