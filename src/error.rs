//! Error types for searchpage
//!
//! The catalog itself cannot fail; these cover the terminal, the log file
//! and the command line.

use thiserror::Error;

/// Main error type for searchpage operations
#[derive(Error, Debug)]
pub enum SearchPageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("Failed to open log file '{0}': {1}")]
    LogFileError(String, std::io::Error),

    #[error("Logging already initialized: {0}")]
    LoggingInitError(String),

    #[error("Unknown category '{0}' (expected all, tutorial or article)")]
    UnknownCategory(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for searchpage operations
pub type Result<T> = std::result::Result<T, SearchPageError>;

impl SearchPageError {
    /// Wrap a terminal I/O failure with what was being attempted
    pub fn terminal(context: &str, err: std::io::Error) -> Self {
        SearchPageError::TerminalError(format!("{}: {}", context, err))
    }

    /// Errors caused by bad user input rather than the environment
    pub fn is_usage_error(&self) -> bool {
        matches!(self, SearchPageError::UnknownCategory(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_culprit() {
        let err = SearchPageError::UnknownCategory("video".into());
        assert!(err.to_string().contains("'video'"));
        assert!(err.is_usage_error());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "no tty");
        let err = SearchPageError::terminal("enable raw mode", io);
        assert_eq!(err.to_string(), "Terminal error: enable raw mode: no tty");
        assert!(!err.is_usage_error());
    }
}
