//! In-memory collecting sink

use crate::core::{LogMessage, Result, Sink};
use parking_lot::Mutex;

/// A sink that keeps every delivered message in memory.
///
/// Useful as a test collector and for inspecting recent output in
/// process.
pub struct MemorySink {
    messages: Mutex<Vec<LogMessage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// A copy of everything delivered so far, in delivery order
    pub fn messages(&self) -> Vec<LogMessage> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn deliver(&self, message: &LogMessage) -> Result<()> {
        self.messages.lock().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
