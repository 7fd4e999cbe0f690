//! Console sink implementation

use super::wrap::wrap_lines;
use crate::core::{LogMessage, LogPayload, Logger, Result, Sink, SinkHandle, TimestampFormat};
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;

/// Default line width payloads are wrapped to
pub const DEFAULT_LINE_WIDTH: usize = 120;

/// A sink that renders messages to stdout as
/// `timestamp [TAG] [sender path] payload`, wrapping long payloads so
/// continuation lines align under the first payload column.
///
/// The rendering is a pure transform of the message; the sink holds no
/// mutable state.
pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    line_width: usize,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the timestamp format for this sink
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format
    /// string
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    /// Set the line width payloads are wrapped to. A width of 0 disables
    /// wrapping.
    #[must_use]
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn deliver(&self, message: &LogMessage) -> Result<()> {
        let rendered = self.render(message);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn close(&self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }
}

impl ConsoleSink {
    fn render(&self, message: &LogMessage) -> String {
        let timestamp = self.timestamp_format.format(&message.timestamp);
        let tag = Self::tag(message);
        let path = message.sender_path();

        // The payload column is computed from the uncolored header
        // `{ts} [{tag}] [{path}] `; color escape codes must not shift
        // the alignment.
        let column = timestamp.chars().count() + tag.len() + path.chars().count() + 7;

        let payload_text = match &message.payload {
            LogPayload::Failure(error) => failure_text(error.as_ref()),
            other => other.to_string(),
        };

        let wrap_width = self.line_width.saturating_sub(column);
        let mut lines = if self.line_width == 0 || wrap_width < 1 {
            vec![payload_text]
        } else {
            wrap_lines(&payload_text, wrap_width)
        };
        if lines.is_empty() {
            lines.push(String::new());
        }

        let mut out = String::new();
        if self.use_colors {
            out.push_str(&format!(
                "{} [{}] [{}] ",
                timestamp.bright_black(),
                self.paint_tag(message, tag),
                path.cyan()
            ));
        } else {
            out.push_str(&format!("{} [{}] [{}] ", timestamp, tag, path));
        }

        let failure = message.payload.is_failure();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
                out.push_str(&" ".repeat(column));
            }
            if self.use_colors && failure {
                out.push_str(&format!("{}", line.red()));
            } else {
                out.push_str(line);
            }
        }
        out.push('\n');

        out
    }

    /// The four-character bracket tag: the level, `NONE` for level-less
    /// messages, `EXCE` for failure payloads.
    fn tag(message: &LogMessage) -> &'static str {
        if message.payload.is_failure() {
            return "EXCE";
        }

        match message.level {
            Some(crate::core::LogLevel::Info) => "INFO",
            Some(crate::core::LogLevel::Warning) => "WARN",
            Some(crate::core::LogLevel::Error) => "ERRO",
            None => "NONE",
        }
    }

    fn paint_tag(&self, message: &LogMessage, tag: &'static str) -> String {
        if message.payload.is_failure() {
            return tag.white().on_red().to_string();
        }

        match message.level {
            Some(level) => tag.color(level.color_code()).to_string(),
            None => tag.to_string(),
        }
    }
}

/// Render an error together with its source chain.
fn failure_text(error: &(dyn std::error::Error + Send + Sync)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str("\ncaused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

impl Logger {
    /// Attach a [`ConsoleSink`] with default settings.
    pub fn attach_console(&self) -> SinkHandle {
        self.attach_sink(Arc::new(ConsoleSink::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LogMessage, LogPayload};
    use chrono::TimeZone;

    fn message(level: Option<LogLevel>, payload: LogPayload) -> LogMessage {
        let timestamp = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        LogMessage::new(timestamp, vec!["app".to_string()], level, payload)
    }

    fn plain_sink() -> ConsoleSink {
        ConsoleSink::with_colors(false)
    }

    #[test]
    fn test_render_info_message() {
        let rendered = plain_sink().render(&message(
            Some(LogLevel::Info),
            LogPayload::from("Server started"),
        ));

        assert_eq!(
            rendered,
            "2025-01-08T10:30:45.000Z [INFO] [app] Server started\n"
        );
    }

    #[test]
    fn test_render_tags_per_level() {
        let sink = plain_sink();

        let warn = sink.render(&message(Some(LogLevel::Warning), LogPayload::from("w")));
        assert!(warn.contains("[WARN]"));

        let error = sink.render(&message(Some(LogLevel::Error), LogPayload::from("e")));
        assert!(error.contains("[ERRO]"));

        let none = sink.render(&message(None, LogPayload::from("n")));
        assert!(none.contains("[NONE]"));
    }

    #[test]
    fn test_render_failure_uses_exce_tag() {
        let payload = LogPayload::failure(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing file",
        ));
        let rendered = plain_sink().render(&message(None, payload));

        assert!(rendered.contains("[EXCE]"));
        assert!(rendered.contains("missing file"));
    }

    #[test]
    fn test_render_wraps_and_aligns_continuation_lines() {
        // Header: "2025-01-08T10:30:45.000Z [INFO] [app] " = 38 columns,
        // leaving 12 columns of payload at width 50.
        let sink = ConsoleSink::with_colors(false).with_line_width(50);
        let rendered = sink.render(&message(
            Some(LogLevel::Info),
            LogPayload::from("alpha beta gamma delta"),
        ));

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "2025-01-08T10:30:45.000Z [INFO] [app] alpha beta");
        assert_eq!(lines[1], format!("{}gamma delta", " ".repeat(38)));

        // Continuation payload starts in the same column as the first.
        let column = lines[0].find("alpha").expect("payload present");
        assert!(lines[1][column..].starts_with("gamma"));
    }

    #[test]
    fn test_render_with_wrapping_disabled() {
        let sink = ConsoleSink::with_colors(false).with_line_width(0);
        let long_payload = "word ".repeat(100);
        let rendered = sink.render(&message(Some(LogLevel::Info), LogPayload::from(long_payload)));

        assert_eq!(rendered.lines().count(), 1);
    }

    #[test]
    fn test_render_empty_payload() {
        let rendered = plain_sink().render(&message(Some(LogLevel::Info), LogPayload::from("")));

        assert_eq!(rendered, "2025-01-08T10:30:45.000Z [INFO] [app] \n");
    }

    #[test]
    fn test_render_failure_includes_source_chain() {
        #[derive(Debug)]
        struct Outer(std::io::Error);

        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "outer failed")
            }
        }

        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let payload = LogPayload::failure(Outer(std::io::Error::new(
            std::io::ErrorKind::Other,
            "inner cause",
        )));
        let sink = ConsoleSink::with_colors(false).with_line_width(0);
        let rendered = sink.render(&message(None, payload));

        assert!(rendered.contains("outer failed"));
        assert!(rendered.contains("caused by: inner cause"));
    }

    #[test]
    fn test_render_custom_timestamp() {
        let sink = ConsoleSink::with_colors(false).with_custom_timestamp("%Y/%m/%d");
        let rendered = sink.render(&message(Some(LogLevel::Info), LogPayload::from("x")));

        assert!(rendered.starts_with("2025/01/08 "));
    }
}
