//! # Date Normalization

//! This module parses the heterogeneous date representations the upstream providers
//! emit into a canonical `NaiveDateTime`. Upstream data is frequently malformed or
//! empty, so the central contract here is that parsing never fails loudly: every
//! failure degrades to `None`, which downstream components read as "not yet occurred".

use chrono::{NaiveDate, NaiveDateTime};

/// Datetime layouts attempted, in order, for non-slash-delimited input.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only layouts attempted after the datetime layouts.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m-%d-%Y"];

/// Parses a raw provider date string into a canonical instant.
///
/// Accepts slash-delimited `M/D/YY` and `M/D/YYYY` (2-digit years are interpreted as
/// 2000+YY), ISO-8601 with or without an offset, and common date-only variants.
/// Returns `None` for null, empty/whitespace-only, or unparseable input — absence is a
/// normal value here, never an error.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDateTime> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains('/') {
        return parse_slash_date(trimmed);
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    // RFC 3339 carries an offset; keep the wall-clock time as written.
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_local());
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Parses `M/D/YY` or `M/D/YYYY`, tolerating a trailing time component which some
/// provider exports append after a space.
fn parse_slash_date(raw: &str) -> Option<NaiveDateTime> {
    let date_part = raw.split_whitespace().next()?;
    let mut parts = date_part.split('/');

    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let mut year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// Returns the signed number of calendar days from `now` until `instant`.
///
/// Both sides are truncated to midnight before subtraction so that "same calendar day"
/// yields 0 rather than a fraction; a past instant yields a negative count.
pub fn days_until(instant: NaiveDateTime, now: NaiveDateTime) -> i64 {
    instant.date().signed_duration_since(now.date()).num_days()
}
