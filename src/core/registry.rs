//! Copy-on-write sink registry
//!
//! Attach and detach replace the current snapshot with a new immutable
//! one instead of mutating it in place, so the pipeline worker can read
//! one atomic snapshot per message without holding a lock across
//! delivery. A sink attached after a message was enqueued but before it
//! was dequeued may still receive that message; a sink detached in that
//! window may or may not. There is no retroactive guarantee either way.

use super::sink::Sink;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// A sink together with the slot id it was attached under.
///
/// The id ties a [`SinkHandle`] to the exact attachment it came from, so
/// detaching removes that attachment and not a value-equal sink attached
/// separately.
#[derive(Clone)]
pub struct RegisteredSink {
    id: u64,
    sink: Arc<dyn Sink>,
}

impl RegisteredSink {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }
}

/// The set of currently attached sinks, in attachment order.
pub struct SinkRegistry {
    snapshot: RwLock<Arc<Vec<RegisteredSink>>>,
    next_id: AtomicU64,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Attach a sink, returning the handle that detaches it again.
    pub fn attach(self: &Arc<Self>, sink: Arc<dyn Sink>) -> SinkHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut current = self.snapshot.write();
        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend(current.iter().cloned());
        next.push(RegisteredSink { id, sink });
        *current = Arc::new(next);

        SinkHandle {
            id,
            registry: Arc::downgrade(self),
        }
    }

    /// Remove the attachment with the given id. A no-op when the id is
    /// not present, so detaching twice is safe.
    pub fn detach(&self, id: u64) {
        let mut current = self.snapshot.write();
        if !current.iter().any(|registered| registered.id == id) {
            return;
        }

        let next: Vec<RegisteredSink> = current
            .iter()
            .filter(|registered| registered.id != id)
            .cloned()
            .collect();
        *current = Arc::new(next);
    }

    /// The current snapshot. Surviving entries keep their relative order
    /// across detaches.
    pub fn snapshot(&self) -> Arc<Vec<RegisteredSink>> {
        Arc::clone(&self.snapshot.read())
    }

    pub fn len(&self) -> usize {
        self.snapshot.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.read().is_empty()
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by attach. Detaches exactly the sink it attached.
///
/// Detaching is explicit; dropping the handle leaves the sink attached
/// for the lifetime of the logger.
pub struct SinkHandle {
    id: u64,
    registry: Weak<SinkRegistry>,
}

impl SinkHandle {
    /// Detach the sink this handle was returned for. Idempotent: calling
    /// this twice, or after the logger is gone, is a no-op.
    pub fn detach(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.detach(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::core::log_message::LogMessage;

    struct NamedSink(&'static str);

    impl Sink for NamedSink {
        fn deliver(&self, _message: &LogMessage) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    fn names(registry: &SinkRegistry) -> Vec<String> {
        registry
            .snapshot()
            .iter()
            .map(|registered| registered.sink().name().to_string())
            .collect()
    }

    #[test]
    fn test_attach_preserves_order() {
        let registry = Arc::new(SinkRegistry::new());
        registry.attach(Arc::new(NamedSink("a")));
        registry.attach(Arc::new(NamedSink("b")));
        registry.attach(Arc::new(NamedSink("c")));

        assert_eq!(names(&registry), ["a", "b", "c"]);
    }

    #[test]
    fn test_detach_keeps_relative_order_of_survivors() {
        let registry = Arc::new(SinkRegistry::new());
        registry.attach(Arc::new(NamedSink("a")));
        let handle = registry.attach(Arc::new(NamedSink("b")));
        registry.attach(Arc::new(NamedSink("c")));

        handle.detach();

        assert_eq!(names(&registry), ["a", "c"]);
    }

    #[test]
    fn test_detach_twice_is_noop() {
        let registry = Arc::new(SinkRegistry::new());
        let handle = registry.attach(Arc::new(NamedSink("a")));

        handle.detach();
        handle.detach();

        assert!(registry.is_empty());
    }

    #[test]
    fn test_handle_targets_exact_attachment() {
        // Two attachments of equally-named sinks must be independently
        // detachable.
        let registry = Arc::new(SinkRegistry::new());
        let first = registry.attach(Arc::new(NamedSink("dup")));
        let _second = registry.attach(Arc::new(NamedSink("dup")));

        first.detach();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_is_immutable_under_mutation() {
        let registry = Arc::new(SinkRegistry::new());
        registry.attach(Arc::new(NamedSink("a")));

        let snapshot = registry.snapshot();
        registry.attach(Arc::new(NamedSink("b")));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_detach_after_registry_dropped_is_noop() {
        let registry = Arc::new(SinkRegistry::new());
        let handle = registry.attach(Arc::new(NamedSink("a")));

        drop(registry);
        handle.detach();
    }

    #[test]
    fn test_concurrent_attach_detach() {
        let registry = Arc::new(SinkRegistry::new());
        let mut threads = Vec::new();

        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            threads.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    let handle = registry.attach(Arc::new(NamedSink("churn")));
                    let _ = registry.snapshot();
                    handle.detach();
                }
            }));
        }

        for thread in threads {
            thread.join().expect("thread panicked");
        }

        assert!(registry.is_empty());
    }
}
