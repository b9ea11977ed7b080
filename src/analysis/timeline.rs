//! # Timeline Building

//! This module flattens a canonical record's dated milestones into one chronological
//! event list for the container detail view. Absent dates are silently omitted, never
//! emitted as placeholder events.

use chrono::NaiveDateTime;
use crate::models::{CanonicalContainerRecord, TimelineEvent};

/// The fixed enumeration of timeline candidates: every lifecycle and deadline date the
/// canonical record carries, with its operator-facing label. Enumeration order is the
/// tie-break for events sharing an instant.
const TIMELINE_FIELDS: [(&str, fn(&CanonicalContainerRecord) -> Option<NaiveDateTime>); 13] = [
    ("Vessel ETA", |r| r.vessel_eta),
    ("Actual Arrival", |r| r.ata),
    ("Discharged", |r| r.discharge_date),
    ("Available at Pier", |r| r.available_at_pier),
    ("Pier Last Free Day", |r| r.pier_last_free_day),
    ("In at CFS", |r| r.date_in),
    ("Stripped", |r| r.strip_date),
    ("Available at Warehouse", |r| r.available_at_warehouse),
    ("Warehouse Free Time Expiry", |r| r.warehouse_free_time_expiry),
    ("Appointment", |r| r.appointment_date),
    ("Dispatched", |r| r.dispatched_date),
    ("Outgated", |r| r.outgated_date),
    ("Empty Returned", |r| r.return_empty_date),
];

/// Builds the chronological event timeline for a container.
///
/// Each present date becomes one event, marked past when its instant is at or before
/// `now`. Events are sorted ascending by instant with a stable sort, so two events on
/// the same instant keep the fixed enumeration order above.
pub fn build(record: &CanonicalContainerRecord, now: NaiveDateTime) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = TIMELINE_FIELDS
        .iter()
        .filter_map(|(label, date_of)| {
            date_of(record).map(|instant| TimelineEvent {
                instant,
                label,
                is_past: instant <= now,
            })
        })
        .collect();

    events.sort_by_key(|event| event.instant);
    events
}
