//! Shared field-extraction helpers for the source adapters.
//!
//! Both providers expose each logical field under one or more alternate names
//! depending on provider version; adapters pick the first alias that carries a
//! non-empty value.

use chrono::NaiveDateTime;
use serde_json::Value;
use crate::normalize::parse_date;

/// Returns the first non-empty string value among the given aliases.
///
/// Numeric values are stringified, since some providers emit reference numbers as JSON
/// numbers. Empty and whitespace-only strings are treated as absent.
pub fn first_text(raw: &Value, aliases: &[&str]) -> Option<String> {
    for alias in aliases {
        match raw.get(alias) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Returns the first alias that normalizes to a valid instant.
///
/// An alias holding a malformed date string is skipped rather than shadowing a later
/// alias that parses; a record with no parseable alias gets `None`.
pub fn first_date(raw: &Value, aliases: &[&str]) -> Option<NaiveDateTime> {
    for alias in aliases {
        if let Some(Value::String(s)) = raw.get(alias) {
            if let Some(parsed) = parse_date(Some(s)) {
                return Some(parsed);
            }
        }
    }
    None
}
