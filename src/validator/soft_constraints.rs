use crate::types::{Schedule, ScheduleInput};
use crate::validator::SoftScore;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Score fulfillment of every soft-constraint term S1-S7 against the
/// weights actually used for the solve (SPEC_FULL.md §4.6). Terms whose
/// weight is zero contribute `(0, 0)` so they don't skew the overall ratio.
pub fn calculate_soft_scores(schedule: &Schedule, input: &ScheduleInput) -> Vec<SoftScore> {
    vec![
        score_pair_bonus(schedule, input),
        score_singleton_penalty(schedule, input),
        score_same_grade_bonus(schedule, input),
        score_continuity_bonus(schedule, input),
        score_teacher_gaps(schedule, input),
        score_student_gaps(schedule, input),
        score_shortage_penalty(schedule, input),
    ]
}

fn score_pair_bonus(schedule: &Schedule, input: &ScheduleInput) -> SoftScore {
    let weight = input.weights.max_two_students_bonus;
    let total_shifts = schedule.shifts.len() as f64;
    let two_count = schedule.shifts.iter().filter(|s| s.assigned_students.len() == 2).count() as f64;

    SoftScore {
        constraint: "MaxTwoStudentsBonus".to_string(),
        score: weight * two_count,
        max_score: weight * total_shifts,
        details: format!("{two_count:.0}/{total_shifts:.0} shifts fully paired"),
    }
}

fn score_singleton_penalty(schedule: &Schedule, input: &ScheduleInput) -> SoftScore {
    let weight = input.weights.single_student_penalty;
    let total_shifts = schedule.shifts.len() as f64;
    let singleton_count = schedule.shifts.iter().filter(|s| s.assigned_students.len() == 1).count() as f64;

    SoftScore {
        constraint: "SingleStudentPenalty".to_string(),
        score: weight * (total_shifts - singleton_count),
        max_score: weight * total_shifts,
        details: format!("{singleton_count:.0}/{total_shifts:.0} shifts left as singletons"),
    }
}

fn score_same_grade_bonus(schedule: &Schedule, input: &ScheduleInput) -> SoftScore {
    let weight = input.weights.same_grade_bonus;
    let grade_of: HashMap<&str, &str> = input.students.iter().map(|s| (s.id.0.as_str(), s.grade.as_str())).collect();

    let mut same_grade_pairs = 0.0;
    let mut two_student_shifts = 0.0;
    for shift in &schedule.shifts {
        if shift.assigned_students.len() == 2 {
            two_student_shifts += 1.0;
            let g0 = grade_of.get(shift.assigned_students[0].0.as_str());
            let g1 = grade_of.get(shift.assigned_students[1].0.as_str());
            if g0.is_some() && g0 == g1 {
                same_grade_pairs += 1.0;
            }
        }
    }

    SoftScore {
        constraint: "SameGradeBonus".to_string(),
        score: weight * same_grade_pairs,
        max_score: weight * two_student_shifts,
        details: format!("{same_grade_pairs:.0}/{two_student_shifts:.0} paired shifts are same-grade"),
    }
}

fn score_continuity_bonus(schedule: &Schedule, input: &ScheduleInput) -> SoftScore {
    let weight = input.weights.regular_class_continuity_bonus;
    let continuity: HashSet<(&str, &str, &str)> = input
        .regular_classes
        .iter()
        .flat_map(|rc| {
            rc.enrolled_student_ids
                .iter()
                .map(move |sid| (rc.teacher_id.0.as_str(), rc.subject_id.0.as_str(), sid.0.as_str()))
        })
        .collect();

    let mut matches = 0.0;
    let mut opportunities = 0.0;
    for student in &input.students {
        for subject_id in student.requirements.keys() {
            let has_regular = continuity.iter().any(|(_, s, stu)| *s == subject_id.0 && *stu == student.id.0);
            if has_regular {
                opportunities += 1.0;
            }
        }
    }
    for shift in &schedule.shifts {
        for student_id in &shift.assigned_students {
            if continuity.contains(&(shift.teacher_id.0.as_str(), shift.subject_id.0.as_str(), student_id.0.as_str())) {
                matches += 1.0;
            }
        }
    }

    SoftScore {
        constraint: "RegularClassContinuityBonus".to_string(),
        score: weight * matches,
        max_score: weight * opportunities.max(matches),
        details: format!("{matches:.0}/{opportunities:.0} continuity opportunities kept"),
    }
}

/// Shared gap-counting logic for S5/S6: walk each entity's available
/// timeslots in `period_index` order per date and count how many
/// consecutive-pair transitions between "has a shift here" and "doesn't"
/// were avoided.
fn count_gaps<'a>(
    available: &[crate::types::TimeSlotId],
    timeslots_by_id: &BTreeMap<&'a str, &'a crate::types::TimeSlot>,
    has_shift: impl Fn(&str) -> bool,
) -> (f64, f64) {
    let mut by_date: BTreeMap<NaiveDate, Vec<&str>> = BTreeMap::new();
    for ts_id in available {
        if let Some(ts) = timeslots_by_id.get(ts_id.0.as_str()) {
            by_date.entry(ts.date).or_default().push(ts_id.0.as_str());
        }
    }

    let mut transitions = 0.0;
    let mut gaps = 0.0;
    for slots in by_date.values_mut() {
        slots.sort_by_key(|id| timeslots_by_id.get(id).map(|ts| ts.period_index).unwrap_or(0));
        for pair in slots.windows(2) {
            transitions += 1.0;
            if has_shift(pair[0]) != has_shift(pair[1]) {
                gaps += 1.0;
            }
        }
    }

    (transitions, gaps)
}

fn score_teacher_gaps(schedule: &Schedule, input: &ScheduleInput) -> SoftScore {
    let weight = input.weights.teacher_gap_penalty;
    let timeslots_by_id: BTreeMap<&str, &crate::types::TimeSlot> =
        input.timeslots.iter().map(|ts| (ts.id.0.as_str(), ts)).collect();

    let mut total_transitions = 0.0;
    let mut total_gaps = 0.0;
    for teacher in &input.teachers {
        let occupied: HashSet<&str> = schedule
            .shifts
            .iter()
            .filter(|s| s.teacher_id == teacher.id)
            .map(|s| s.timeslot_id.0.as_str())
            .collect();
        let (transitions, gaps) = count_gaps(&teacher.available_timeslots, &timeslots_by_id, |ts| occupied.contains(ts));
        total_transitions += transitions;
        total_gaps += gaps;
    }

    SoftScore {
        constraint: "TeacherGapPenalty".to_string(),
        score: weight * (total_transitions - total_gaps),
        max_score: weight * total_transitions,
        details: format!("{total_gaps:.0}/{total_transitions:.0} teacher-day transitions were gaps"),
    }
}

fn score_student_gaps(schedule: &Schedule, input: &ScheduleInput) -> SoftScore {
    let weight = input.weights.student_gap_penalty;
    let timeslots_by_id: BTreeMap<&str, &crate::types::TimeSlot> =
        input.timeslots.iter().map(|ts| (ts.id.0.as_str(), ts)).collect();

    let mut total_transitions = 0.0;
    let mut total_gaps = 0.0;
    for student in &input.students {
        let occupied: HashSet<&str> = schedule
            .shifts
            .iter()
            .filter(|s| s.has_student(&student.id))
            .map(|s| s.timeslot_id.0.as_str())
            .collect();
        let (transitions, gaps) = count_gaps(&student.available_timeslots, &timeslots_by_id, |ts| occupied.contains(ts));
        let multiplier = match student.gap_preference {
            crate::types::GapPreference::NoGapPreferred => 2.0,
            crate::types::GapPreference::GapAllowed => 1.0,
        };
        total_transitions += transitions * multiplier;
        total_gaps += gaps * multiplier;
    }

    SoftScore {
        constraint: "StudentGapPenalty".to_string(),
        score: weight * (total_transitions - total_gaps),
        max_score: weight * total_transitions,
        details: format!("{total_gaps:.0}/{total_transitions:.0} weighted student-day transitions were gaps"),
    }
}

fn score_shortage_penalty(schedule: &Schedule, input: &ScheduleInput) -> SoftScore {
    let weight = input.weights.shortage_penalty;
    let total_demand: f64 = input.students.iter().flat_map(|s| s.requirements.values()).sum::<u32>() as f64;
    let total_shortage = schedule.total_shortage() as f64;

    SoftScore {
        constraint: "ShortagePenalty".to_string(),
        score: weight * (total_demand - total_shortage),
        max_score: weight * total_demand,
        details: format!("{total_shortage:.0}/{total_demand:.0} demand units unmet"),
    }
}
