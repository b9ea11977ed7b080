//! # Derived View Models

//! This module defines the derived, ephemeral shapes the engine hands to its consumer:
//! timeline events, deadline risk, and the combined per-query container view. None of
//! these are persisted; they are rebuilt on every query from the canonical record.

use chrono::NaiveDateTime;
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use crate::models::container::CanonicalContainerRecord;

/// One dated milestone in a container's history, ordered chronologically in the
/// built timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEvent {
    /// When the milestone occurred or is expected to occur.
    pub instant: NaiveDateTime,
    /// The operator-facing name of the milestone.
    pub label: &'static str,
    /// Whether the milestone is at or before "now".
    pub is_past: bool,
}

/// The severity band of a deadline, driven by days remaining.
///
/// The band boundaries are a fixed business rule: they drive alerting elsewhere in the
/// system and must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, FromStr)]
pub enum Severity {
    /// The deadline has already passed (days remaining < 0).
    Overdue,
    /// The deadline is 0 to 3 days out.
    Critical,
    /// The deadline is 4 to 7 days out.
    Warning,
    /// The deadline is more than 7 days out.
    Ok,
}

/// The evaluated urgency of one deadline candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadlineRisk {
    /// The operator-facing name of the deadline ("Pier Last Free Day" or
    /// "Warehouse Free Time Expiry").
    pub label: &'static str,
    /// The deadline itself.
    pub date: NaiveDateTime,
    /// Signed calendar days until the deadline; 0 means it falls today.
    pub days_remaining: i64,
    /// The severity band `days_remaining` falls into.
    pub severity: Severity,
}

/// The combined result of one lookup: the canonical record plus every derived view,
/// ready for the UI/API layer to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerView {
    /// The normalized record the derivations ran over.
    pub record: CanonicalContainerRecord,
    /// Index into the lifecycle stage table, or `None` when no stage date is present.
    /// `None` renders as "no progress", never as the first stage.
    pub current_stage: Option<usize>,
    /// The most urgent of the present deadline candidates, if any.
    pub deadline_risk: Option<DeadlineRisk>,
    /// All dated milestones, ascending by instant.
    pub timeline: Vec<TimelineEvent>,
}
