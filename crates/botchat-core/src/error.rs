//! Application error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the local side of the client
///
/// Backend failures are not represented here; they travel as
/// `botchat_gateway::GatewayError` inside result messages.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal / signal setup
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Credential and preference files
    // ─────────────────────────────────────────────────────────────
    #[error("Storage error at {path}: {message}")]
    Store { path: PathBuf, message: String },
}

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Store {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_names_the_file() {
        let err = Error::store("/tmp/credentials.toml", "permission denied");
        assert_eq!(
            err.to_string(),
            "Storage error at /tmp/credentials.toml: permission denied"
        );
    }

    #[test]
    fn test_terminal_error_display() {
        let err = Error::terminal("Failed to listen for Ctrl+C: unsupported");
        assert_eq!(
            err.to_string(),
            "Terminal error: Failed to listen for Ctrl+C: unsupported"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
