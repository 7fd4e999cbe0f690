//! Core pipeline types and traits

pub mod error;
pub mod log_level;
pub mod log_message;
pub mod logger;
pub(crate) mod pipeline;
pub mod registry;
pub mod sink;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use log_message::{LogMessage, LogPayload, SharedError};
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use registry::{RegisteredSink, SinkHandle, SinkRegistry};
pub use sink::Sink;
pub use timestamp::{FixedTimeProvider, SystemTimeProvider, TimestampFormat, TimestampProvider};
