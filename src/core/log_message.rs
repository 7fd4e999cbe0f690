//! Log message structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Shared error value carried by a failure payload.
///
/// Errors are reference-counted so a message can be cloned when it is
/// forwarded to a parent logger.
pub type SharedError = Arc<dyn Error + Send + Sync>;

/// The payload of a log message.
#[derive(Debug, Clone)]
pub enum LogPayload {
    /// Plain text
    Text(String),
    /// Structured data, rendered as JSON
    Structured(serde_json::Value),
    /// An error value, rendered with distinct visual treatment by sinks
    Failure(SharedError),
}

impl LogPayload {
    /// Wrap an error value in a failure payload
    pub fn failure(error: impl Error + Send + Sync + 'static) -> Self {
        LogPayload::Failure(Arc::new(error))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LogPayload::Failure(_))
    }

    pub fn as_failure(&self) -> Option<&SharedError> {
        match self {
            LogPayload::Failure(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for LogPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogPayload::Text(text) => write!(f, "{}", text),
            LogPayload::Structured(value) => write!(f, "{}", value),
            LogPayload::Failure(error) => write!(f, "{}", error),
        }
    }
}

impl From<&str> for LogPayload {
    fn from(text: &str) -> Self {
        LogPayload::Text(text.to_string())
    }
}

impl From<String> for LogPayload {
    fn from(text: String) -> Self {
        LogPayload::Text(text)
    }
}

impl From<serde_json::Value> for LogPayload {
    fn from(value: serde_json::Value) -> Self {
        LogPayload::Structured(value)
    }
}

impl From<SharedError> for LogPayload {
    fn from(error: SharedError) -> Self {
        LogPayload::Failure(error)
    }
}

/// An immutable log message travelling through the delivery pipeline.
///
/// The timestamp reflects submission time, not delivery time. `senders`
/// is the logger path from root to leaf; a message submitted directly to
/// a logger carries that logger's name only, and each forwarding parent
/// prepends its own name.
#[derive(Debug, Clone)]
pub struct LogMessage {
    pub timestamp: DateTime<Utc>,
    pub senders: Vec<String>,
    pub level: Option<LogLevel>,
    pub payload: LogPayload,
}

impl LogMessage {
    pub fn new(
        timestamp: DateTime<Utc>,
        senders: Vec<String>,
        level: Option<LogLevel>,
        payload: LogPayload,
    ) -> Self {
        Self {
            timestamp,
            senders,
            level,
            payload,
        }
    }

    /// The space-joined sender path
    pub fn sender_path(&self) -> String {
        self.senders.join(" ")
    }

    /// Derive the copy a parent logger enqueues when forwarding this
    /// message, with the parent's name prepended to the sender path.
    /// Timestamp, level, and payload are unchanged.
    pub(crate) fn forwarded_via(&self, parent_name: &str) -> Self {
        let mut senders = Vec::with_capacity(self.senders.len() + 1);
        senders.push(parent_name.to_string());
        senders.extend(self.senders.iter().cloned());

        Self {
            timestamp: self.timestamp,
            senders,
            level: self.level,
            payload: self.payload.clone(),
        }
    }
}
