//! Error types for the streamer module.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while building or running an ffmpeg invocation.
#[derive(Debug, Error)]
pub enum StreamerError {
    /// Endpoint configuration is missing or malformed.
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// FFmpeg could not be located or did not run.
    #[error("FFmpeg not found or not working at {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    /// A single attempt exceeded its deadline and was killed.
    #[error("FFmpeg timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Every attempt failed; carries the most recent failure.
    #[error("All {attempts} attempts failed, last error: {last_error}")]
    ExecutionFailed {
        attempts: u32,
        #[source]
        last_error: Box<StreamerError>,
    },

    /// A referenced local input file does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// FFmpeg ran but exited unsuccessfully.
    #[error("FFmpeg exited with code: {code:?}")]
    ProcessFailed { code: Option<i32> },

    /// FFmpeg could not be spawned.
    #[error("Failed to spawn {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory does not exist and could not be created.
    #[error("Failed to create output directory: {path}")]
    OutputDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while supervising the child process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StreamerError {
    /// Creates a new configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Creates a new unavailable error for the given tool path.
    pub fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether a single attempt that failed with this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::ProcessFailed { .. } | Self::Spawn { .. } | Self::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed_message_includes_attempts_and_cause() {
        let err = StreamerError::ExecutionFailed {
            attempts: 4,
            last_error: Box::new(StreamerError::ProcessFailed { code: Some(1) }),
        };
        let msg = err.to_string();
        assert!(msg.contains("All 4 attempts failed"));
        assert!(msg.contains("FFmpeg exited with code: Some(1)"));
    }

    #[test]
    fn test_execution_failed_exposes_source() {
        let err = StreamerError::ExecutionFailed {
            attempts: 2,
            last_error: Box::new(StreamerError::Timeout {
                timeout: Duration::from_secs(30),
            }),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("timed out"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(StreamerError::ProcessFailed { code: Some(1) }.is_retryable());
        assert!(StreamerError::Timeout {
            timeout: Duration::from_secs(1)
        }
        .is_retryable());
        assert!(!StreamerError::config("bad").is_retryable());
        assert!(!StreamerError::InputNotFound {
            path: PathBuf::from("/missing.mp4")
        }
        .is_retryable());
    }
}
