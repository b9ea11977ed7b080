//! # Container Lifecycle Stages

//! This module defines the fixed, ordered list of lifecycle milestones a container moves
//! through, from "en route" to "delivered". The list is static configuration, not
//! instance data: each stage binds a display label to the canonical date field that
//! marks the stage as reached.

use chrono::NaiveDateTime;
use crate::models::container::CanonicalContainerRecord;

/// One milestone in the container lifecycle, bound to the canonical date field whose
/// presence marks the milestone as reached.
pub struct LifecycleStage {
    /// The operator-facing name of the stage.
    pub label: &'static str,
    /// Accessor for the record date field bound to this stage.
    pub date_of: fn(&CanonicalContainerRecord) -> Option<NaiveDateTime>,
}

/// The ordered lifecycle stage table.
///
/// Order matters: the stage deriver scans this table front to back and the index of the
/// last stage with a present date is the container's current stage.
pub static LIFECYCLE_STAGES: [LifecycleStage; 7] = [
    LifecycleStage { label: "En Route", date_of: |r| r.vessel_eta },
    LifecycleStage { label: "At Pier", date_of: |r| r.ata },
    LifecycleStage { label: "At Facility", date_of: |r| r.date_in },
    LifecycleStage { label: "Stripped", date_of: |r| r.strip_date },
    LifecycleStage { label: "Available", date_of: |r| r.available_at_warehouse },
    LifecycleStage { label: "Dispatched", date_of: |r| r.dispatched_date },
    LifecycleStage { label: "Delivered", date_of: |r| r.outgated_date },
];
