//! # Async Sink Logger
//!
//! An in-process asynchronous logging pipeline with attachable sinks,
//! flush barriers, and graceful shutdown.
//!
//! ## Features
//!
//! - **Non-blocking submission**: `log` enqueues and returns; a single
//!   background worker delivers in submission order
//! - **Flush barriers**: `flush` completes only once everything submitted
//!   before it has reached every attached sink
//! - **Dynamic sinks**: attach and detach sinks from any thread while
//!   messages are in flight
//! - **Fault isolation**: a failing or panicking sink never disturbs the
//!   other sinks or the pipeline
//!
//! ## Example
//!
//! ```
//! use async_sink_logger::prelude::*;
//! use async_sink_logger::sinks::MemorySink;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::new("app");
//! let handle = logger.attach_sink(sink.clone());
//!
//! logger.info("Server started");
//! logger.flush().unwrap();
//! assert_eq!(sink.len(), 1);
//!
//! handle.detach();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    pub use crate::sinks::MemorySink;
    pub use crate::core::{
        FixedTimeProvider, LogLevel, LogMessage, LogPayload, Logger, LoggerBuilder, LoggerError,
        RegisteredSink, Result, SharedError, Sink, SinkHandle, SinkRegistry, SystemTimeProvider,
        TimestampFormat, TimestampProvider, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

#[cfg(feature = "console")]
pub use crate::sinks::ConsoleSink;
pub use crate::core::{
    FixedTimeProvider, LogLevel, LogMessage, LogPayload, Logger, LoggerBuilder, LoggerError,
    RegisteredSink, Result, SharedError, Sink, SinkHandle, SinkRegistry, SystemTimeProvider,
    TimestampFormat, TimestampProvider, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::sinks::MemorySink;
