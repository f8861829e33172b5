use super::{RegularClassId, StudentId, SubjectId, TeacherId, TimeSlotId};
use serde::{Deserialize, Serialize};

/// A pre-existing recurring lesson, outside the optimization, that blocks
/// its (teacher, timeslot) from being reused by the solver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegularClass {
    pub id: RegularClassId,
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub timeslot_id: TimeSlotId,
    #[serde(default)]
    pub enrolled_student_ids: Vec<StudentId>,
}
