//! Sink trait for log output destinations

use super::{error::Result, log_message::LogMessage};

/// A destination for delivered log messages.
///
/// `deliver` is only ever invoked from the pipeline worker thread, one
/// message at a time, so implementations never see concurrent delivery.
/// Errors returned from `deliver` are reported to the diagnostic stream
/// and never interrupt delivery to other sinks.
pub trait Sink: Send + Sync {
    fn deliver(&self, message: &LogMessage) -> Result<()>;

    fn name(&self) -> &str;

    /// Release any held resources during logger shutdown.
    ///
    /// Best-effort: a failure here is reported and does not prevent other
    /// sinks from being closed.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}
