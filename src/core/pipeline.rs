//! Delivery queue items and the pipeline worker
//!
//! Flush barriers ride the same unbounded queue as log messages, so a
//! barrier completes only after everything enqueued before it has been
//! processed. No separate "wait for empty" primitive exists.

use super::log_level::LogLevel;
use super::log_message::LogMessage;
use super::logger::Logger;
use super::registry::{RegisteredSink, SinkRegistry};
use crossbeam_channel::{bounded, Receiver};
use parking_lot::RwLock;
use std::sync::Arc;

/// An element of the delivery queue: a real log message or a flush
/// barrier sentinel.
pub(crate) enum PipelineItem {
    Record(LogMessage),
    Barrier(FlushBarrier),
}

/// The sentinel a flush call enqueues. Completing it releases the waiter
/// blocked in `flush`.
pub(crate) struct FlushBarrier {
    done: crossbeam_channel::Sender<()>,
}

impl FlushBarrier {
    /// Create a barrier together with the receiver its waiter blocks on.
    pub(crate) fn new() -> (Self, Receiver<()>) {
        let (done, wait) = bounded(1);
        (Self { done }, wait)
    }

    /// Signal the waiter. Safe to call when the waiter has already given
    /// up (flush timeout): the send fails silently and the barrier is
    /// discarded.
    pub(crate) fn complete(&self) {
        let _ = self.done.try_send(());
    }
}

/// The single consumer of the delivery queue.
///
/// Runs on a dedicated thread for the lifetime of its logger and drains
/// items in submission order. The loop ends when every sender half of
/// the queue has been dropped; that is the cooperative shutdown signal,
/// not an error.
pub(crate) struct PipelineWorker {
    receiver: Receiver<PipelineItem>,
    registry: Arc<SinkRegistry>,
    min_level: Arc<RwLock<LogLevel>>,
    parent: Option<Arc<Logger>>,
}

impl PipelineWorker {
    pub(crate) fn new(
        receiver: Receiver<PipelineItem>,
        registry: Arc<SinkRegistry>,
        min_level: Arc<RwLock<LogLevel>>,
        parent: Option<Arc<Logger>>,
    ) -> Self {
        Self {
            receiver,
            registry,
            min_level,
            parent,
        }
    }

    pub(crate) fn run(self) {
        for item in self.receiver.iter() {
            match item {
                // Barriers are never level-filtered and never reach sinks.
                PipelineItem::Barrier(barrier) => barrier.complete(),
                PipelineItem::Record(message) => self.process_record(message),
            }
        }
    }

    fn process_record(&self, message: LogMessage) {
        // Messages without a level bypass the minimum-level filter.
        if let Some(level) = message.level {
            if level < *self.min_level.read() {
                return;
            }
        }

        // One atomic snapshot per message; attach/detach racing this
        // message swap in a new snapshot and never disturb this one.
        let snapshot = self.registry.snapshot();
        for registered in snapshot.iter() {
            Self::deliver_isolated(registered, &message);
        }

        if let Some(parent) = &self.parent {
            parent.forward(message);
        }
    }

    /// Deliver one message to one sink, catching both returned errors and
    /// panics so a failing sink never disturbs the others or stalls the
    /// queue.
    fn deliver_isolated(registered: &RegisteredSink, message: &LogMessage) {
        let sink = registered.sink();
        let delivery = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sink.deliver(message)
        }));

        match delivery {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), error);
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                     Other sinks continue to function.",
                    sink.name(),
                    panic_message(&panic_info)
                );
            }
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
