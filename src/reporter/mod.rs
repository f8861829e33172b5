mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::error::Result;
use crate::types::{Schedule, ScheduleInput, StudentId, TeacherId};
use crate::validator::ValidationReport;
use std::fs;
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Generate all reports and write to output directory. JSON output also
/// writes the three tabular views (`teacher_schedules.json`,
/// `student_schedules.json`, `shortage.json`) alongside `schedule.json`
/// (SPEC_FULL.md §6).
pub fn generate_reports(
    schedule: &Schedule,
    input: &ScheduleInput,
    validation: &ValidationReport,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut schedule_with_score = schedule.clone();
    schedule_with_score.metadata.score = validation.total_score;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(&schedule_with_score)?;
                fs::write(output_dir.join("schedule.json"), json)?;

                let (teacher_rows, student_rows, shortage_rows) = generate_json_tables(&schedule_with_score, input)?;
                fs::write(output_dir.join("teacher_schedules.json"), teacher_rows)?;
                fs::write(output_dir.join("student_schedules.json"), student_rows)?;
                fs::write(output_dir.join("shortage.json"), shortage_rows)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(&schedule_with_score, input, validation);
                fs::write(output_dir.join("schedule.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(&schedule_with_score, input, validation);
                fs::write(output_dir.join("schedule.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// Generate a student's individual agenda, grouped by date then period.
pub fn generate_student_schedule(schedule: &Schedule, input: &ScheduleInput, student_id: &StudentId) -> Option<String> {
    let student = input.students.iter().find(|s| &s.id == student_id)?;

    let mut lines = vec![format!("# Schedule for {} ({})", student.name, student.id), format!("Grade: {}\n", student.grade)];

    let mut rows: Vec<_> = schedule.shifts.iter().filter(|s| s.has_student(student_id)).collect();

    if rows.is_empty() {
        lines.push("No shifts assigned.".to_string());
    } else {
        rows.sort_by_key(|s| timeslot_sort_key(input, &s.timeslot_id));

        lines.push("## Shifts\n".to_string());
        for shift in rows {
            let subject = subject_name(input, &shift.subject_id);
            let teacher = teacher_name(input, &shift.teacher_id);
            let (date, period) = timeslot_label(input, &shift.timeslot_id);
            lines.push(format!("- **{date} P{period}**: {subject} with {teacher}"));
        }
    }

    let shortage: Vec<_> = schedule.shortage.iter().filter(|e| &e.student_id == student_id).collect();
    if !shortage.is_empty() {
        lines.push("\n## Shortage\n".to_string());
        for entry in shortage {
            lines.push(format!("- {}: {} unmet", subject_name(input, &entry.subject_id), entry.shortage_count));
        }
    }

    Some(lines.join("\n"))
}

/// Generate a teacher's agenda, grouped by date then period.
pub fn generate_teacher_schedule(schedule: &Schedule, input: &ScheduleInput, teacher_id: &TeacherId) -> Option<String> {
    let teacher = input.teachers.iter().find(|t| &t.id == teacher_id)?;

    let mut lines = vec![format!("# Schedule for {} ({})", teacher.name, teacher.id), String::new()];

    let mut shifts: Vec<_> = schedule.shifts.iter().filter(|s| &s.teacher_id == teacher_id).collect();

    if shifts.is_empty() {
        lines.push("No shifts assigned.".to_string());
    } else {
        shifts.sort_by_key(|s| timeslot_sort_key(input, &s.timeslot_id));
        lines.push(format!("## Teaching {} shift(s)\n", shifts.len()));

        for shift in shifts {
            let subject = subject_name(input, &shift.subject_id);
            let (date, period) = timeslot_label(input, &shift.timeslot_id);
            let student_names: Vec<&str> = shift
                .assigned_students
                .iter()
                .map(|sid| input.students.iter().find(|s| &s.id == sid).map(|s| s.name.as_str()).unwrap_or("Unknown"))
                .collect();

            lines.push(format!(
                "- **{date} P{period}**: {subject} ({}) - {}",
                shift.assigned_students.len(),
                student_names.join(", ")
            ));
        }
    }

    Some(lines.join("\n"))
}

fn timeslot_sort_key(input: &ScheduleInput, ts_id: &crate::types::TimeSlotId) -> (chrono::NaiveDate, u32) {
    input
        .timeslots
        .iter()
        .find(|ts| &ts.id == ts_id)
        .map(|ts| (ts.date, ts.period_index))
        .unwrap_or_else(|| (chrono::NaiveDate::MIN, 0))
}

fn timeslot_label(input: &ScheduleInput, ts_id: &crate::types::TimeSlotId) -> (String, u32) {
    input
        .timeslots
        .iter()
        .find(|ts| &ts.id == ts_id)
        .map(|ts| (ts.date.to_string(), ts.period_index))
        .unwrap_or_else(|| ("unknown".to_string(), 0))
}

fn subject_name(input: &ScheduleInput, subject_id: &crate::types::SubjectId) -> String {
    input.subjects.iter().find(|s| &s.id == subject_id).map(|s| s.name.clone()).unwrap_or_else(|| subject_id.0.clone())
}

fn teacher_name(input: &ScheduleInput, teacher_id: &TeacherId) -> String {
    input.teachers.iter().find(|t| &t.id == teacher_id).map(|t| t.name.clone()).unwrap_or_else(|| teacher_id.0.clone())
}
