use super::{SubjectId, TeacherId, TimeSlotId};
use serde::{Deserialize, Serialize};

/// A tutor available to staff shifts during a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    /// Minimum number of shifts this teacher must work once they work at all
    pub min_classes: u32,
    /// Advisory target shift count; not consumed by the solver
    #[serde(default)]
    pub desired_shift_count: u32,
    pub teachable_subjects: Vec<SubjectId>,
    #[serde(default)]
    pub available_timeslots: Vec<TimeSlotId>,
}

impl Teacher {
    /// Check if this teacher can teach a given subject
    pub fn can_teach(&self, subject_id: &SubjectId) -> bool {
        self.teachable_subjects.contains(subject_id)
    }

    /// Check if this teacher is free during a timeslot
    pub fn is_available(&self, timeslot_id: &TimeSlotId) -> bool {
        self.available_timeslots.contains(timeslot_id)
    }
}
