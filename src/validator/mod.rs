mod hard_constraints;
mod soft_constraints;

pub use hard_constraints::*;
pub use soft_constraints::*;

use crate::types::{Schedule, ScheduleInput};
use std::collections::HashMap;

/// Result of independently re-checking a produced schedule against every
/// hard constraint and scoring its soft-constraint fulfillment
/// (SPEC_FULL.md §4.6). Deliberately does not reuse the model builder's
/// constraint list, so a bug in the model can't also hide in the check.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub hard_violations: Vec<Violation>,
    pub soft_scores: Vec<SoftScore>,
    pub total_score: f64,
    pub statistics: ScheduleStatistics,
}

/// A hard-constraint violation (H1-H4 or the eligibility closure property).
#[derive(Debug, Clone)]
pub struct Violation {
    pub constraint: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// Fulfillment of one soft-constraint term (S1-S7).
#[derive(Debug, Clone)]
pub struct SoftScore {
    pub constraint: String,
    pub score: f64,
    pub max_score: f64,
    pub details: String,
}

/// Summary statistics over a produced schedule.
#[derive(Debug, Clone)]
pub struct ScheduleStatistics {
    pub total_shifts: usize,
    pub total_teachers: usize,
    pub total_students: usize,
    pub total_assignments: usize,
    pub total_shortage: u32,
    pub students_fully_served: usize,
    pub teachers_with_shifts: usize,
    pub avg_shifts_per_active_teacher: f64,
    pub shift_count_variance: f64,
}

/// Re-check H1-H4 and the eligibility closure property, score S1-S7
/// fulfillment, and summarize the result.
pub fn validate_schedule(schedule: &Schedule, input: &ScheduleInput) -> ValidationReport {
    let mut hard_violations = Vec::new();
    hard_violations.extend(check_demand_accounting(schedule, input));
    hard_violations.extend(check_student_overlap(schedule));
    hard_violations.extend(check_teacher_capacity(schedule));
    hard_violations.extend(check_teacher_min_load(schedule, input));
    hard_violations.extend(check_eligibility_closure(schedule, input));

    let soft_scores = calculate_soft_scores(schedule, input);
    let statistics = calculate_statistics(schedule, input);

    let total_score = if hard_violations.iter().any(|v| v.severity == Severity::Error) {
        0.0
    } else {
        let soft_total: f64 = soft_scores.iter().map(|s| s.score).sum();
        let soft_max: f64 = soft_scores.iter().map(|s| s.max_score).sum();
        if soft_max > 0.0 {
            (soft_total / soft_max) * 100.0
        } else {
            100.0
        }
    };

    ValidationReport {
        is_valid: hard_violations.iter().all(|v| v.severity != Severity::Error),
        hard_violations,
        soft_scores,
        total_score,
        statistics,
    }
}

fn calculate_statistics(schedule: &Schedule, input: &ScheduleInput) -> ScheduleStatistics {
    let total_shifts = schedule.shifts.len();
    let total_students = input.students.len();
    let total_assignments = schedule.total_assignments();
    let total_shortage = schedule.total_shortage();

    let shortage_map = schedule.shortage_map();
    let students_fully_served = input
        .students
        .iter()
        .filter(|s| s.requirements.keys().all(|subj| shortage_map.get(&(&s.id, subj)).copied().unwrap_or(0) == 0))
        .count();

    let mut shift_counts: HashMap<&str, usize> = HashMap::new();
    for shift in &schedule.shifts {
        *shift_counts.entry(shift.teacher_id.0.as_str()).or_default() += 1;
    }
    let teachers_with_shifts = shift_counts.len();

    let avg_shifts_per_active_teacher = if teachers_with_shifts > 0 {
        total_shifts as f64 / teachers_with_shifts as f64
    } else {
        0.0
    };

    let shift_count_variance = if teachers_with_shifts > 0 {
        let mean = avg_shifts_per_active_teacher;
        shift_counts.values().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / teachers_with_shifts as f64
    } else {
        0.0
    };

    ScheduleStatistics {
        total_shifts,
        total_teachers: input.teachers.len(),
        total_students,
        total_assignments,
        total_shortage,
        students_fully_served,
        teachers_with_shifts,
        avg_shifts_per_active_teacher,
        shift_count_variance,
    }
}
