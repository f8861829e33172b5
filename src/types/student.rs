use super::{StudentId, SubjectId, TimeSlotId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether a student would rather keep consecutive shifts gap-free
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum GapPreference {
    NoGapPreferred,
    GapAllowed,
}

/// A student with per-subject lesson requirements and availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Opaque grade tag; only equality is meaningful to the solver
    pub grade: String,
    pub gap_preference: GapPreference,
    /// subject id -> number of lessons still required this campaign
    #[serde(default)]
    pub requirements: HashMap<SubjectId, u32>,
    #[serde(default)]
    pub available_timeslots: Vec<TimeSlotId>,
}

impl Student {
    /// Check if this student still requires at least one lesson of a subject
    pub fn requires(&self, subject_id: &SubjectId) -> bool {
        self.requirements.get(subject_id).copied().unwrap_or(0) > 0
    }

    /// Check if this student is free during a timeslot
    pub fn is_available(&self, timeslot_id: &TimeSlotId) -> bool {
        self.available_timeslots.contains(timeslot_id)
    }
}
