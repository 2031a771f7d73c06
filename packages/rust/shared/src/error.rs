//! Error types for guidewatch.
//!
//! Library crates use [`GuidewatchError`] via `thiserror`.
//! App crates (checker/notifier) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all guidewatch operations.
#[derive(Debug, thiserror::Error)]
pub enum GuidewatchError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error during a page fetch.
    #[error("network error: {0}")]
    Network(String),

    /// HTML or JSON parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Notification delivery failed after exhausting retries.
    #[error("delivery error: {0}")]
    Delivery(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GuidewatchError>;

impl GuidewatchError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = GuidewatchError::config("TELEGRAM_BOT_TOKEN not set");
        assert_eq!(err.to_string(), "config error: TELEGRAM_BOT_TOKEN not set");

        let err = GuidewatchError::Delivery("HTTP 502 after 3 attempts".into());
        assert!(err.to_string().contains("502"));
    }
}
