//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use async_sink_logger::prelude::*;
//! use async_sink_logger::info;
//!
//! let logger = Logger::new("app");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at the given level with automatic formatting.
///
/// The level is an `Option<LogLevel>`; pass `None` for a message that
/// bypasses the minimum-level filter.
///
/// # Examples
///
/// ```
/// # use async_sink_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use async_sink_logger::log;
/// log!(logger, Some(LogLevel::Info), "Simple message");
/// log!(logger, None, "Unfiltered: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use async_sink_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use async_sink_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, Some($crate::LogLevel::Info), $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use async_sink_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use async_sink_logger::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, Some($crate::LogLevel::Warning), $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use async_sink_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use async_sink_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, Some($crate::LogLevel::Error), $($arg)+)
    };
}
