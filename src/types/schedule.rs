use super::{ShiftId, StudentId, SubjectId, TeacherId, TimeSlotId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A chosen (teacher, subject, timeslot), filled with one or two students
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub timeslot_id: TimeSlotId,
    pub assigned_students: Vec<StudentId>,
}

impl Shift {
    pub fn has_student(&self, student_id: &StudentId) -> bool {
        self.assigned_students.contains(student_id)
    }
}

/// One row of unmet demand: a student is short `shortage_count` lessons of a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortageEntry {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub shortage_count: u32,
}

/// Metadata about a produced schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    pub generated_at: String,
    pub algorithm_version: String,
    pub score: f64,
    pub solve_time_ms: u64,
}

impl Default for ScheduleMetadata {
    fn default() -> Self {
        Self {
            generated_at: String::new(),
            algorithm_version: String::new(),
            score: 0.0,
            solve_time_ms: 0,
        }
    }
}

/// The complete solved schedule for one campaign: the assigned shifts plus
/// the residual per-(student, subject) shortage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub shifts: Vec<Shift>,
    pub shortage: Vec<ShortageEntry>,
    pub metadata: ScheduleMetadata,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            shifts: Vec::new(),
            shortage: Vec::new(),
            metadata: ScheduleMetadata {
                generated_at: chrono::Utc::now().to_rfc3339(),
                algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
                score: 0.0,
                solve_time_ms: 0,
            },
        }
    }

    /// Shifts a given teacher is staffed on
    pub fn teacher_shifts(&self, teacher_id: &TeacherId) -> Vec<&Shift> {
        self.shifts.iter().filter(|s| &s.teacher_id == teacher_id).collect()
    }

    /// Shifts a given student attends
    pub fn student_shifts(&self, student_id: &StudentId) -> Vec<&Shift> {
        self.shifts.iter().filter(|s| s.has_student(student_id)).collect()
    }

    /// Total number of student-shift assignments (size-1 shifts count once, size-2 twice)
    pub fn total_assignments(&self) -> usize {
        self.shifts.iter().map(|s| s.assigned_students.len()).sum()
    }

    /// Total unmet demand across all (student, subject) pairs
    pub fn total_shortage(&self) -> u32 {
        self.shortage.iter().map(|s| s.shortage_count).sum()
    }

    /// Index the shortage rows by (student, subject) for O(1) lookup
    pub fn shortage_map(&self) -> HashMap<(&StudentId, &SubjectId), u32> {
        self.shortage
            .iter()
            .map(|s| ((&s.student_id, &s.subject_id), s.shortage_count))
            .collect()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}
