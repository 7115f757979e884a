// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.
//!
//! Timestamps are stored as RFC3339 UTC strings; the display helpers
//! produce the fixed strings the frontend shows in round lists.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a UTC timestamp as a `dd.mm.yyyy` display date.
pub fn format_display_date(date: DateTime<Utc>) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Format a UTC timestamp as a `HH:MM` display time.
pub fn format_display_time(date: DateTime<Utc>) -> String {
    date.format("%H:%M").to_string()
}

/// Parse a stored RFC3339 timestamp back to UTC.
///
/// Returns `None` for anything that is not valid RFC3339.
pub fn parse_utc_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, 14, 5, 30).unwrap()
    }

    #[test]
    fn test_rfc3339_uses_z_suffix() {
        assert_eq!(format_utc_rfc3339(sample()), "2026-03-07T14:05:30Z");
    }

    #[test]
    fn test_display_date_is_zero_padded() {
        assert_eq!(format_display_date(sample()), "07.03.2026");
    }

    #[test]
    fn test_display_time_drops_seconds() {
        assert_eq!(format_display_time(sample()), "14:05");
    }

    #[test]
    fn test_parse_round_trips_storage_format() {
        let parsed = parse_utc_rfc3339("2026-03-07T14:05:30Z").unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_utc_rfc3339("last tuesday").is_none());
        assert!(parse_utc_rfc3339("").is_none());
    }
}
