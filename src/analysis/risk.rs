//! # Deadline Risk Evaluation

//! This module evaluates the two free-time deadlines a container can carry (pier last
//! free day, warehouse free time expiry), selects the more urgent one, and classifies
//! it into a severity band. The bands drive alerting elsewhere in the system, so their
//! boundaries are exact and fixed.

use chrono::NaiveDateTime;
use crate::models::{CanonicalContainerRecord, DeadlineRisk, Severity};
use crate::normalize::days_until;

const PIER_DEADLINE_LABEL: &str = "Pier Last Free Day";
const WAREHOUSE_DEADLINE_LABEL: &str = "Warehouse Free Time Expiry";

/// Classifies a days-remaining count into its severity band.
///
/// Bands: `< 0` overdue, `0..=3` critical, `4..=7` warning, `> 7` ok.
pub fn classify(days_remaining: i64) -> Severity {
    match days_remaining {
        d if d < 0 => Severity::Overdue,
        0..=3 => Severity::Critical,
        4..=7 => Severity::Warning,
        _ => Severity::Ok,
    }
}

fn risk_for(label: &'static str, date: NaiveDateTime, now: NaiveDateTime) -> DeadlineRisk {
    let days_remaining = days_until(date, now);
    DeadlineRisk {
        label,
        date,
        days_remaining,
        severity: classify(days_remaining),
    }
}

/// Evaluates every present deadline candidate, most urgent first.
///
/// The detail view surfaces only the single most urgent deadline, which can hide a
/// second simultaneous breach; this keeps both visible for callers that want them.
/// Ties keep pier before warehouse.
pub fn evaluate_all(record: &CanonicalContainerRecord, now: NaiveDateTime) -> Vec<DeadlineRisk> {
    let mut risks: Vec<DeadlineRisk> = [
        record.pier_last_free_day.map(|d| risk_for(PIER_DEADLINE_LABEL, d, now)),
        record.warehouse_free_time_expiry.map(|d| risk_for(WAREHOUSE_DEADLINE_LABEL, d, now)),
    ]
    .into_iter()
    .flatten()
    .collect();

    risks.sort_by_key(|risk| risk.days_remaining);
    risks
}

/// Evaluates the single most urgent deadline for the container, if any is present.
///
/// When both candidates are present the one with fewer days remaining wins; with only
/// one present it is used as-is; with neither, `None`.
pub fn evaluate(record: &CanonicalContainerRecord, now: NaiveDateTime) -> Option<DeadlineRisk> {
    evaluate_all(record, now).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(classify(-1), Severity::Overdue);
        assert_eq!(classify(0), Severity::Critical);
        assert_eq!(classify(3), Severity::Critical);
        assert_eq!(classify(4), Severity::Warning);
        assert_eq!(classify(7), Severity::Warning);
        assert_eq!(classify(8), Severity::Ok);
    }
}
