use crate::types::{Schedule, ScheduleInput};
use crate::validator::{Severity, Violation};
use std::collections::{HashMap, HashSet};

/// H1 - for every `(student, subject)` requirement, assignments plus
/// reported shortage must equal the required count (§8 testable property 1).
///
/// Re-derives the count independently of the model builder's shortage
/// bookkeeping so a bug in one can't hide behind the other.
pub fn check_demand_accounting(schedule: &Schedule, input: &ScheduleInput) -> Vec<Violation> {
    let mut violations = Vec::new();
    let shortage_map = schedule.shortage_map();

    for student in &input.students {
        for (subject_id, &required) in &student.requirements {
            if required == 0 {
                continue;
            }
            let assigned = schedule
                .shifts
                .iter()
                .filter(|shift| &shift.subject_id == subject_id && shift.has_student(&student.id))
                .count() as u32;
            let shortage = shortage_map.get(&(&student.id, subject_id)).copied().unwrap_or(0);

            if assigned + shortage != required {
                violations.push(Violation {
                    constraint: "DemandAccounting".to_string(),
                    message: format!(
                        "student '{}' subject '{}': {assigned} assigned + {shortage} shortage != {required} required",
                        student.id, subject_id
                    ),
                    severity: Severity::Error,
                });
            }
        }
    }

    violations
}

/// H2 - a student attends at most one shift per timeslot.
pub fn check_student_overlap(schedule: &Schedule) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for shift in &schedule.shifts {
        for student_id in &shift.assigned_students {
            let key = (student_id.0.as_str(), shift.timeslot_id.0.as_str());
            if !seen.insert(key) {
                violations.push(Violation {
                    constraint: "StudentOverlap".to_string(),
                    message: format!("student '{}' double-booked at timeslot '{}'", student_id, shift.timeslot_id),
                    severity: Severity::Error,
                });
            }
        }
    }

    violations
}

/// H3 - a shift holds one or two students, and a teacher holds at most one
/// shift per timeslot (capacity is already bounded by shift size).
pub fn check_teacher_capacity(schedule: &Schedule) -> Vec<Violation> {
    let mut violations = Vec::new();

    for shift in &schedule.shifts {
        if shift.assigned_students.is_empty() || shift.assigned_students.len() > 2 {
            violations.push(Violation {
                constraint: "TeacherCapacity".to_string(),
                message: format!(
                    "shift '{}' has {} students, expected 1 or 2",
                    shift.id,
                    shift.assigned_students.len()
                ),
                severity: Severity::Error,
            });
        }
    }

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for shift in &schedule.shifts {
        let key = (shift.teacher_id.0.as_str(), shift.timeslot_id.0.as_str());
        if !seen.insert(key) {
            violations.push(Violation {
                constraint: "TeacherCapacity".to_string(),
                message: format!(
                    "teacher '{}' double-booked at timeslot '{}'",
                    shift.teacher_id, shift.timeslot_id
                ),
                severity: Severity::Error,
            });
        }
    }

    violations
}

/// H4 - a teacher with any shifts in the campaign must have at least
/// `min_classes` of them.
pub fn check_teacher_min_load(schedule: &Schedule, input: &ScheduleInput) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut counts: HashMap<&str, u32> = HashMap::new();

    for shift in &schedule.shifts {
        *counts.entry(shift.teacher_id.0.as_str()).or_default() += 1;
    }

    for teacher in &input.teachers {
        if let Some(&count) = counts.get(teacher.id.0.as_str()) {
            if count > 0 && count < teacher.min_classes {
                violations.push(Violation {
                    constraint: "TeacherMinLoad".to_string(),
                    message: format!(
                        "teacher '{}' has {count} shift(s), below min_classes={}",
                        teacher.id, teacher.min_classes
                    ),
                    severity: Severity::Error,
                });
            }
        }
    }

    violations
}

/// Eligibility closure - every shift must still satisfy the five filters
/// from §4.1: teacher qualification/availability, student demand/
/// availability, and absence of a recurring-class conflict.
pub fn check_eligibility_closure(schedule: &Schedule, input: &ScheduleInput) -> Vec<Violation> {
    let mut violations = Vec::new();
    let blocked: HashSet<(&str, &str)> = input
        .regular_classes
        .iter()
        .map(|rc| (rc.teacher_id.0.as_str(), rc.timeslot_id.0.as_str()))
        .collect();

    for shift in &schedule.shifts {
        let Some(teacher) = input.teachers.iter().find(|t| t.id == shift.teacher_id) else {
            violations.push(Violation {
                constraint: "EligibilityClosure".to_string(),
                message: format!("shift '{}' references unknown teacher '{}'", shift.id, shift.teacher_id),
                severity: Severity::Error,
            });
            continue;
        };

        if !teacher.can_teach(&shift.subject_id) {
            violations.push(Violation {
                constraint: "EligibilityClosure".to_string(),
                message: format!("teacher '{}' is not qualified for subject '{}'", teacher.id, shift.subject_id),
                severity: Severity::Error,
            });
        }
        if !teacher.is_available(&shift.timeslot_id) {
            violations.push(Violation {
                constraint: "EligibilityClosure".to_string(),
                message: format!("teacher '{}' is not available at timeslot '{}'", teacher.id, shift.timeslot_id),
                severity: Severity::Error,
            });
        }
        if blocked.contains(&(teacher.id.0.as_str(), shift.timeslot_id.0.as_str())) {
            violations.push(Violation {
                constraint: "EligibilityClosure".to_string(),
                message: format!(
                    "shift '{}' uses (teacher, timeslot) occupied by a recurring class",
                    shift.id
                ),
                severity: Severity::Error,
            });
        }

        for student_id in &shift.assigned_students {
            let Some(student) = input.students.iter().find(|s| &s.id == student_id) else {
                violations.push(Violation {
                    constraint: "EligibilityClosure".to_string(),
                    message: format!("shift '{}' references unknown student '{}'", shift.id, student_id),
                    severity: Severity::Error,
                });
                continue;
            };
            if !student.is_available(&shift.timeslot_id) {
                violations.push(Violation {
                    constraint: "EligibilityClosure".to_string(),
                    message: format!("student '{}' is not available at timeslot '{}'", student.id, shift.timeslot_id),
                    severity: Severity::Error,
                });
            }
            if !student.requires(&shift.subject_id) {
                violations.push(Violation {
                    constraint: "EligibilityClosure".to_string(),
                    message: format!("student '{}' does not require subject '{}'", student.id, shift.subject_id),
                    severity: Severity::Error,
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn make_shift(teacher: &str, subject: &str, ts: &str, students: &[&str]) -> Shift {
        Shift {
            id: ShiftId(format!("{teacher}-{ts}")),
            teacher_id: TeacherId(teacher.to_string()),
            subject_id: SubjectId(subject.to_string()),
            timeslot_id: TimeSlotId(ts.to_string()),
            assigned_students: students.iter().map(|s| StudentId(s.to_string())).collect(),
        }
    }

    #[test]
    fn detects_student_overlap() {
        let schedule = Schedule {
            shifts: vec![
                make_shift("T1", "M", "TS1", &["S1"]),
                make_shift("T2", "E", "TS1", &["S1"]),
            ],
            shortage: vec![],
            metadata: ScheduleMetadata::default(),
        };

        let violations = check_student_overlap(&schedule);
        assert!(!violations.is_empty());
    }

    #[test]
    fn detects_oversized_shift() {
        let schedule = Schedule {
            shifts: vec![make_shift("T1", "M", "TS1", &["S1", "S2", "S3"])],
            shortage: vec![],
            metadata: ScheduleMetadata::default(),
        };

        let violations = check_teacher_capacity(&schedule);
        assert!(!violations.is_empty());
    }
}
