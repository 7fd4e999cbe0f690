//! Error types for the logging pipeline

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A flush barrier was not processed before the wait expired
    #[error("Flush did not complete within {timeout:?}")]
    FlushTimeout { timeout: Duration },

    /// Logger already stopped
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Sink delivery failure with sink name
    #[error("Sink '{sink}' failed: {message}")]
    SinkFailure { sink: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a flush timeout error
    pub fn flush_timeout(timeout: Duration) -> Self {
        LoggerError::FlushTimeout { timeout }
    }

    /// Create a sink failure error
    pub fn sink_failure(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkFailure {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
