// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Shared helpers for date/time conversion.

use chrono::{DateTime, Utc};
use time::OffsetDateTime;

/// Convert a chrono UTC timestamp to the `time` type used by cookies.
/// Out-of-range values clamp to the Unix epoch.
pub fn to_offset_datetime(date: DateTime<Utc>) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(date.timestamp()).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_offset_datetime_preserves_seconds() {
        let date = DateTime::parse_from_rfc3339("2026-03-01T12:30:45Z")
            .unwrap()
            .with_timezone(&Utc);
        let converted = to_offset_datetime(date);
        assert_eq!(converted.unix_timestamp(), date.timestamp());
        assert_eq!(converted.hour(), 12);
        assert_eq!(converted.minute(), 30);
    }
}
