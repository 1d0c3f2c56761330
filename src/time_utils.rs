// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Minute-precision time for human-readable messages, e.g. `2026-03-01 14:30`.
pub fn format_minutes(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_formats() {
        let date = Utc.with_ymd_and_hms(2026, 3, 1, 14, 30, 59).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2026-03-01T14:30:59Z");
        assert_eq!(format_minutes(date), "2026-03-01 14:30");
    }
}
