//! File logging for searchpage
//!
//! The TUI owns the terminal, so log output goes to a file instead of
//! stderr. By default that is `searchpage.log` next to the executable,
//! truncated on every run. `RUST_LOG` overrides the level.

use crate::error::{Result, SearchPageError};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "searchpage.log";

/// Logging options
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Log file; `None` means next to the executable
    pub path: Option<PathBuf>,
    /// Log at debug level when `RUST_LOG` is not set
    pub verbose: bool,
}

impl LogConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_log_path)
    }

    fn default_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Get the log file path (same directory as executable)
fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

/// Install the global subscriber. Returns the file being written to.
pub fn init(config: &LogConfig) -> Result<PathBuf> {
    let path = config.resolved_path();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(&path)
        .map_err(|e| SearchPageError::LogFileError(path.display().to_string(), e))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| SearchPageError::LoggingInitError(e.to_string()))?;

    separator("startup");
    info!(log_file = %path.display(), "logging initialized");
    Ok(path)
}

/// Write a separator line for readability
pub fn separator(label: &str) {
    info!("========== {} ==========", label);
}
