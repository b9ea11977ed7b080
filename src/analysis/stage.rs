//! # Lifecycle Stage Derivation

//! This module computes a container's current lifecycle stage from its canonical
//! record. The stage is derived on every read, never stored, so it cannot drift out of
//! sync with the underlying dates.

use crate::models::{CanonicalContainerRecord, LIFECYCLE_STAGES};

/// Derives the current lifecycle stage as an index into the stage table.
///
/// Backward-scan: walk the ordered stage table front to back and remember the index of
/// every stage whose bound date is present; the last one remembered wins. A later
/// stage's presence overrides an earlier gap, so a container whose `strip_date` was
/// never recorded still reads as "Available" once its warehouse date exists. This keeps
/// the derived stage monotonic: adding a later-stage date can never move the result
/// backwards.
///
/// Returns `None` when no stage date is present at all. Callers must render that as
/// "no progress" — never as the first stage, which would falsely imply the container
/// is en route when there may simply be no data.
pub fn current_stage(record: &CanonicalContainerRecord) -> Option<usize> {
    let mut reached = None;
    for (index, stage) in LIFECYCLE_STAGES.iter().enumerate() {
        if (stage.date_of)(record).is_some() {
            reached = Some(index);
        }
    }
    reached
}

/// The label of the given stage index, for operator-facing rendering.
pub fn stage_label(index: usize) -> Option<&'static str> {
    LIFECYCLE_STAGES.get(index).map(|stage| stage.label)
}
