//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_message::{LogMessage, LogPayload},
    pipeline::{FlushBarrier, PipelineItem, PipelineWorker},
    registry::{SinkHandle, SinkRegistry},
    sink::Sink,
    timestamp::{SystemTimeProvider, TimestampProvider},
};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit
/// shutdown. For custom timeout control, use the `shutdown()` method
/// instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// An asynchronous logger.
///
/// Submissions from any thread are enqueued on an unbounded queue and
/// delivered in submission order by a single background worker to every
/// sink attached at delivery time. `log` never blocks; `flush` blocks
/// until everything submitted before it has been delivered.
///
/// # Example
///
/// ```
/// use async_sink_logger::prelude::*;
///
/// let logger = Logger::new("app");
/// logger.info("Server started");
/// logger.flush().unwrap();
/// ```
pub struct Logger {
    name: String,
    min_level: Arc<RwLock<LogLevel>>,
    registry: Arc<SinkRegistry>,
    timestamps: Arc<dyn TimestampProvider>,
    parent: Option<Arc<Logger>>,
    sender: Option<Sender<PipelineItem>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Logger {
    /// Create a logger and start its pipeline worker immediately.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(
            name.into(),
            LogLevel::Info,
            Arc::new(SystemTimeProvider),
            None,
        )
    }

    fn with_config(
        name: String,
        min_level: LogLevel,
        timestamps: Arc<dyn TimestampProvider>,
        parent: Option<Arc<Logger>>,
    ) -> Self {
        let (sender, receiver) = unbounded();
        let registry = Arc::new(SinkRegistry::new());
        let min_level = Arc::new(RwLock::new(min_level));

        let worker = PipelineWorker::new(
            receiver,
            Arc::clone(&registry),
            Arc::clone(&min_level),
            parent.clone(),
        );
        let handle = thread::spawn(move || worker.run());

        Self {
            name,
            min_level,
            registry,
            timestamps,
            parent,
            sender: Some(sender),
            worker: Some(handle),
        }
    }

    /// The name of this logger, carried as the sender path of every
    /// message submitted to it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent logger accepted messages are forwarded to, if any.
    pub fn parent(&self) -> Option<&Arc<Logger>> {
        self.parent.as_ref()
    }

    /// The minimum level a leveled message must reach to be delivered.
    /// Messages without a level are always delivered.
    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    /// Submit a message. Never blocks and never fails; submissions after
    /// shutdown are silently dropped.
    ///
    /// The timestamp is taken here, on the submitting thread, so it
    /// reflects submission time rather than delivery time.
    pub fn log(&self, level: Option<LogLevel>, payload: impl Into<LogPayload>) {
        let message = LogMessage::new(
            self.timestamps.now(),
            vec![self.name.clone()],
            level,
            payload.into(),
        );
        self.enqueue(PipelineItem::Record(message));
    }

    /// Submit an error value as a level-less message. Level-less messages
    /// bypass the minimum-level filter and reach every attached sink.
    pub fn log_failure(&self, error: impl std::error::Error + Send + Sync + 'static) {
        self.log(None, LogPayload::failure(error));
    }

    #[inline]
    pub fn info(&self, payload: impl Into<LogPayload>) {
        self.log(Some(LogLevel::Info), payload);
    }

    #[inline]
    pub fn warning(&self, payload: impl Into<LogPayload>) {
        self.log(Some(LogLevel::Warning), payload);
    }

    #[inline]
    pub fn error(&self, payload: impl Into<LogPayload>) {
        self.log(Some(LogLevel::Error), payload);
    }

    /// Attach a sink. Every message accepted after this call is delivered
    /// to it; the returned handle detaches it again.
    pub fn attach_sink(&self, sink: Arc<dyn Sink>) -> SinkHandle {
        self.registry.attach(sink)
    }

    /// The currently attached sinks, in attachment order.
    pub fn sinks(&self) -> Vec<Arc<dyn Sink>> {
        self.registry
            .snapshot()
            .iter()
            .map(|registered| Arc::clone(registered.sink()))
            .collect()
    }

    /// Block until every message submitted before this call has been
    /// delivered.
    ///
    /// Implemented by enqueueing a barrier sentinel behind all pending
    /// messages and waiting for the worker to reach it.
    pub fn flush(&self) -> Result<()> {
        let wait = self.enqueue_barrier()?;
        wait.recv().map_err(|_| LoggerError::LoggerStopped)
    }

    /// Like [`flush`](Logger::flush), but give up after `timeout`.
    ///
    /// On timeout the barrier stays in the queue; the worker completes it
    /// later as a no-op, so an abandoned flush never disturbs the
    /// pipeline.
    pub fn flush_timeout(&self, timeout: Duration) -> Result<()> {
        let wait = self.enqueue_barrier()?;
        match wait.recv_timeout(timeout) {
            Ok(()) => Ok(()),
            Err(RecvTimeoutError::Timeout) => Err(LoggerError::flush_timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(LoggerError::LoggerStopped),
        }
    }

    fn enqueue_barrier(&self) -> Result<Receiver<()>> {
        let sender = self.sender.as_ref().ok_or(LoggerError::LoggerStopped)?;
        let (barrier, wait) = FlushBarrier::new();
        sender
            .send(PipelineItem::Barrier(barrier))
            .map_err(|_| LoggerError::LoggerStopped)?;
        Ok(wait)
    }

    fn enqueue(&self, item: PipelineItem) {
        if let Some(sender) = &self.sender {
            // Unbounded queue: send only fails when the logger is
            // shutting down, which is silently ignored.
            let _ = sender.send(item);
        }
    }

    /// Re-enqueue a message delivered by a child logger, with this
    /// logger's name prepended to the sender path.
    pub(crate) fn forward(&self, message: LogMessage) {
        self.enqueue(PipelineItem::Record(message.forwarded_via(&self.name)));
    }

    /// Gracefully shut down the logger.
    ///
    /// In order: flush everything submitted so far, close the queue,
    /// wait for the worker to finish draining, then close every attached
    /// sink. Closing is attempted for every sink regardless of earlier
    /// close failures. Returns `true` when all of that completed within
    /// `timeout`.
    ///
    /// Called implicitly on drop with [`DEFAULT_SHUTDOWN_TIMEOUT`].
    /// Calling it again after it has completed is a no-op.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        if self.sender.is_none() && self.worker.is_none() {
            return true;
        }

        let mut clean = true;

        // Drain everything submitted before the shutdown request.
        match self.flush_timeout(timeout) {
            Ok(()) | Err(LoggerError::LoggerStopped) => {}
            Err(error) => {
                eprintln!("[LOGGER WARNING] Flush during shutdown failed: {}", error);
                clean = false;
            }
        }

        // Close the queue to signal the worker; it drains whatever is
        // still buffered and exits.
        drop(self.sender.take());

        if let Some(handle) = self.worker.take() {
            let start = std::time::Instant::now();

            loop {
                if handle.is_finished() {
                    if let Err(panic_info) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Pipeline worker panicked during shutdown: {:?}",
                            panic_info
                        );
                        clean = false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Pipeline worker did not finish within {:?}. \
                         Some messages may be lost.",
                        timeout
                    );
                    // The worker may still be delivering; closing sinks
                    // underneath it is not safe, so skip that step.
                    return false;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        for registered in self.registry.snapshot().iter() {
            if let Err(error) = registered.sink().close() {
                eprintln!(
                    "[LOGGER ERROR] Failed to close sink '{}': {}",
                    registered.sink().name(),
                    error
                );
                clean = false;
            }
        }

        clean
    }

    /// Create a builder for a logger named `name`.
    ///
    /// # Example
    ///
    /// ```
    /// use async_sink_logger::prelude::*;
    ///
    /// let logger = Logger::builder("app")
    ///     .min_level(LogLevel::Warning)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if !self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT) {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' did not shut down cleanly within {:?}",
                self.name, DEFAULT_SHUTDOWN_TIMEOUT
            );
        }
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
///
/// ```
/// use async_sink_logger::prelude::*;
/// use async_sink_logger::sinks::MemorySink;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::builder("app")
///     .min_level(LogLevel::Warning)
///     .sink(sink)
///     .build();
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    timestamps: Arc<dyn TimestampProvider>,
    parent: Option<Arc<Logger>>,
    sinks: Vec<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: LogLevel::Info,
            timestamps: Arc::new(SystemTimeProvider),
            parent: None,
            sinks: Vec::new(),
        }
    }

    /// Set the minimum level for leveled messages
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the timestamp provider, e.g. a fixed clock in tests
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamps = provider;
        self
    }

    /// Set a parent logger that accepted messages are forwarded to after
    /// local delivery. The parent is shared, never owned: it is not shut
    /// down when this logger is.
    #[must_use = "builder methods return a new value"]
    pub fn parent(mut self, parent: Arc<Logger>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attach a sink at construction time
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Build the logger and start its worker
    pub fn build(self) -> Logger {
        let logger = Logger::with_config(self.name, self.min_level, self.timestamps, self.parent);
        for sink in self.sinks {
            logger.attach_sink(sink);
        }
        logger
    }
}
