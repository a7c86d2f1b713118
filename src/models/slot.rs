use serde::{Deserialize, Serialize};

/// A single 30-minute bookable cell, as snapshotted by the persistence
/// layer before the session starts. Read-only for the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Slot {
    pub is_available: bool,
    pub is_booked: bool,
    pub booked_by_me: bool,
    pub reserved_for_workshop: bool,
    pub workshop_name: Option<String>,
    /// Occurrence id of the workshop this slot belongs to, if any.
    /// Typed field, checked against the currently-edited workshop's
    /// occurrence set when evaluating reservation conflicts.
    pub workshop_occurrence_id: Option<String>,
}
