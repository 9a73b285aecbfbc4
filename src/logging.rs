//! File logging for the binary.
//!
//! The picker owns the terminal, so records never go to stderr. Logging stays
//! off unless `CDER_LOG` holds a filter such as `debug` or `cder=trace`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Env, Target};

use crate::app_dirs;

pub const LOG_ENV: &str = "CDER_LOG";
pub const LOG_FILE_NAME: &str = "cder.log";

pub fn log_file_path() -> Result<PathBuf> {
    Ok(app_dirs::get_cache_dir()?.join(LOG_FILE_NAME))
}

/// Install the logger when `CDER_LOG` is set. Returns the log file in use.
pub fn initialize() -> Result<Option<PathBuf>> {
    if std::env::var_os(LOG_ENV).is_none() {
        return Ok(None);
    }

    let path = log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::new().filter(LOG_ENV))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("a logger is already installed")?;

    log::info!("cder {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(Some(path))
}
