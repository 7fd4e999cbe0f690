//! Timestamp provisioning and formatting
//!
//! Message timestamps come from a pluggable [`TimestampProvider`] so tests
//! can inject deterministic clocks. [`TimestampFormat`] covers the formats
//! commonly expected by log aggregation tools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source of message timestamps.
///
/// The logger calls [`now`](TimestampProvider::now) once per submitted
/// message, on the submitting thread.
pub trait TimestampProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The default provider, backed by the system clock.
#[derive(Debug, Default)]
pub struct SystemTimeProvider;

impl TimestampProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A provider that always returns the same instant. Intended for tests.
#[derive(Debug)]
pub struct FixedTimeProvider(pub DateTime<Utc>);

impl TimestampProvider for FixedTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Standardized timestamp format options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_format() {
        let format = TimestampFormat::Iso8601;
        let result = format.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let format = TimestampFormat::Rfc3339;
        let result = format.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_millis_format() {
        let format = TimestampFormat::UnixMillis;
        let result = format.format(&fixed_datetime());
        let parsed: i64 = result.parse().expect("valid unix millis timestamp");
        assert!(parsed > 1_000_000_000_000);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        let result = format.format(&fixed_datetime());
        assert_eq!(result, "2025/01/08 10:30");
    }

    #[test]
    fn test_default_is_iso8601() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Iso8601);
    }

    #[test]
    fn test_fixed_provider_is_deterministic() {
        let provider = FixedTimeProvider(fixed_datetime());
        assert_eq!(provider.now(), provider.now());
        assert_eq!(provider.now(), fixed_datetime());
    }

    #[test]
    fn test_system_provider_advances() {
        let provider = SystemTimeProvider;
        let first = provider.now();
        let second = provider.now();
        assert!(second >= first);
    }
}
