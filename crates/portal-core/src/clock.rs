//! Clock abstraction for server-assigned timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

/// Abstraction over system time so every written timestamp is injectable.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Formats `at` the way every stored document timestamp is written:
/// RFC 3339, UTC, millisecond precision.
#[must_use]
pub fn to_server_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_server_timestamp_is_utc_with_millis() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();

        assert_eq!(to_server_timestamp(at), "2026-01-15T10:00:00.000Z");
    }
}
