use crate::scheduler::solver::SolveOutcome;
use crate::types::{ScheduleInput, Shift, ShiftId, ShortageEntry, StudentId, SubjectId, TeacherId, TimeSlot, TimeSlotId};
use std::collections::BTreeMap;

/// Group `x=1` decisions by `(teacher, subject, timeslot)` into shift
/// records, and the shortage valuations into a shortage table restricted to
/// strictly positive entries (SPEC_FULL.md §4.5). Shift ids are assigned
/// deterministically by iterating the grouped map sorted by
/// `(date, period_index, teacher_id, subject_id)`.
pub fn project(input: &ScheduleInput, outcome: &SolveOutcome) -> (Vec<Shift>, Vec<ShortageEntry>) {
    let timeslots_by_id: BTreeMap<TimeSlotId, &TimeSlot> =
        input.timeslots.iter().map(|ts| (ts.id.clone(), ts)).collect();

    let mut groups: BTreeMap<(TeacherId, SubjectId, TimeSlotId), Vec<StudentId>> = BTreeMap::new();
    for (key, &assigned) in &outcome.assigned {
        if assigned {
            groups
                .entry((key.teacher_id.clone(), key.subject_id.clone(), key.timeslot_id.clone()))
                .or_default()
                .push(key.student_id.clone());
        }
    }

    let mut ordered: Vec<_> = groups.into_iter().collect();
    ordered.sort_by_key(|((teacher_id, subject_id, timeslot_id), _)| {
        let ts = timeslots_by_id.get(timeslot_id);
        (
            ts.map(|t| t.date),
            ts.map(|t| t.period_index).unwrap_or(0),
            teacher_id.clone(),
            subject_id.clone(),
        )
    });

    let shifts = ordered
        .into_iter()
        .enumerate()
        .map(|(i, ((teacher_id, subject_id, timeslot_id), mut students))| {
            students.sort();
            Shift {
                id: ShiftId(format!("Shift_{}", i + 1)),
                teacher_id,
                subject_id,
                timeslot_id,
                assigned_students: students,
            }
        })
        .collect();

    let mut shortage: Vec<ShortageEntry> = outcome
        .shortage
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|((student_id, subject_id), &count)| ShortageEntry {
            student_id: student_id.clone(),
            subject_id: subject_id.clone(),
            shortage_count: count,
        })
        .collect();
    shortage.sort_by(|a, b| (&a.student_id, &a.subject_id).cmp(&(&b.student_id, &b.subject_id)));

    (shifts, shortage)
}
