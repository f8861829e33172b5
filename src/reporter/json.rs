use crate::error::Result;
use crate::types::{Schedule, ScheduleInput};
use serde::Serialize;

/// The `Schedule` serialized directly for machine consumption.
pub fn generate_json_report(schedule: &Schedule) -> Result<String> {
    Ok(serde_json::to_string_pretty(schedule)?)
}

/// Compact summary for `--quiet` CLI mode.
#[derive(Serialize)]
pub struct JsonSummary {
    pub total_shifts: usize,
    pub total_assignments: usize,
    pub total_shortage: u32,
    pub solve_time_ms: u64,
    pub score: f64,
}

pub fn generate_json_summary(schedule: &Schedule) -> Result<String> {
    let summary = JsonSummary {
        total_shifts: schedule.shifts.len(),
        total_assignments: schedule.total_assignments(),
        total_shortage: schedule.total_shortage(),
        solve_time_ms: schedule.metadata.solve_time_ms,
        score: schedule.metadata.score,
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}

/// One row of the `teacher_schedules` tabular output (SPEC_FULL.md §6): one
/// row per shift.
#[derive(Debug, Clone, Serialize)]
pub struct TeacherScheduleRow {
    pub teacher_id: String,
    pub teacher_name: String,
    pub date: String,
    pub period_index: u32,
    pub subject_id: String,
    pub student_ids: Vec<String>,
    pub student_names: Vec<String>,
}

/// One row of the `student_schedules` tabular output: one row per
/// (shift × assigned student).
#[derive(Debug, Clone, Serialize)]
pub struct StudentScheduleRow {
    pub student_id: String,
    pub student_name: String,
    pub date: String,
    pub period_index: u32,
    pub subject_id: String,
    pub teacher_id: String,
    pub teacher_name: String,
}

/// One row of the `shortage` tabular output: one row per `(student, subject)`
/// with positive unmet count.
#[derive(Debug, Clone, Serialize)]
pub struct ShortageRow {
    pub student_id: String,
    pub student_name: String,
    pub subject_id: String,
    pub subject_name: String,
    pub shortage_count: u32,
}

/// Build the `teacher_schedules` table, sorted by `(teacher_name, date, period_index)`.
pub fn teacher_schedules(schedule: &Schedule, input: &ScheduleInput) -> Vec<TeacherScheduleRow> {
    let mut rows: Vec<TeacherScheduleRow> = schedule
        .shifts
        .iter()
        .filter_map(|shift| {
            let teacher = input.teachers.iter().find(|t| t.id == shift.teacher_id)?;
            let timeslot = input.timeslots.iter().find(|ts| ts.id == shift.timeslot_id)?;
            let student_ids = shift.assigned_students.iter().map(|s| s.0.clone()).collect();
            let student_names = shift
                .assigned_students
                .iter()
                .map(|sid| {
                    input
                        .students
                        .iter()
                        .find(|s| &s.id == sid)
                        .map(|s| s.name.clone())
                        .unwrap_or_else(|| sid.0.clone())
                })
                .collect();

            Some(TeacherScheduleRow {
                teacher_id: teacher.id.0.clone(),
                teacher_name: teacher.name.clone(),
                date: timeslot.date.to_string(),
                period_index: timeslot.period_index,
                subject_id: shift.subject_id.0.clone(),
                student_ids,
                student_names,
            })
        })
        .collect();

    rows.sort_by(|a, b| (&a.teacher_name, &a.date, a.period_index).cmp(&(&b.teacher_name, &b.date, b.period_index)));
    rows
}

/// Build the `student_schedules` table, sorted by `(student_name, date, period_index)`.
pub fn student_schedules(schedule: &Schedule, input: &ScheduleInput) -> Vec<StudentScheduleRow> {
    let mut rows = Vec::new();
    for shift in &schedule.shifts {
        let Some(timeslot) = input.timeslots.iter().find(|ts| ts.id == shift.timeslot_id) else {
            continue;
        };
        let Some(teacher) = input.teachers.iter().find(|t| t.id == shift.teacher_id) else {
            continue;
        };
        for student_id in &shift.assigned_students {
            let Some(student) = input.students.iter().find(|s| &s.id == student_id) else {
                continue;
            };
            rows.push(StudentScheduleRow {
                student_id: student.id.0.clone(),
                student_name: student.name.clone(),
                date: timeslot.date.to_string(),
                period_index: timeslot.period_index,
                subject_id: shift.subject_id.0.clone(),
                teacher_id: teacher.id.0.clone(),
                teacher_name: teacher.name.clone(),
            });
        }
    }

    rows.sort_by(|a, b| (&a.student_name, &a.date, a.period_index).cmp(&(&b.student_name, &b.date, b.period_index)));
    rows
}

/// Build the `shortage` table.
pub fn shortage_table(schedule: &Schedule, input: &ScheduleInput) -> Vec<ShortageRow> {
    schedule
        .shortage
        .iter()
        .map(|entry| {
            let student_name = input
                .students
                .iter()
                .find(|s| s.id == entry.student_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| entry.student_id.0.clone());
            let subject_name = input
                .subjects
                .iter()
                .find(|s| s.id == entry.subject_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| entry.subject_id.0.clone());

            ShortageRow {
                student_id: entry.student_id.0.clone(),
                student_name,
                subject_id: entry.subject_id.0.clone(),
                subject_name,
                shortage_count: entry.shortage_count,
            }
        })
        .collect()
}

/// Serialize all three tabular outputs as JSON arrays (SPEC_FULL.md §6).
pub fn generate_json_tables(schedule: &Schedule, input: &ScheduleInput) -> Result<(String, String, String)> {
    Ok((
        serde_json::to_string_pretty(&teacher_schedules(schedule, input))?,
        serde_json::to_string_pretty(&student_schedules(schedule, input))?,
        serde_json::to_string_pretty(&shortage_table(schedule, input))?,
    ))
}
