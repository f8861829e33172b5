use crate::reporter::json::{shortage_table, teacher_schedules};
use crate::types::{Schedule, ScheduleInput};
use crate::validator::ValidationReport;
use std::collections::BTreeMap;

/// Generate a markdown report of the schedule: summary, validation status,
/// soft-score breakdown, per-subject shift tables, shortage table
/// (SPEC_FULL.md §4.7).
pub fn generate_markdown_report(schedule: &Schedule, input: &ScheduleInput, validation: &ValidationReport) -> String {
    let mut lines = vec![
        "# Schedule Report".to_string(),
        String::new(),
        format!("Generated: {}", schedule.metadata.generated_at),
        format!("Algorithm: v{}", schedule.metadata.algorithm_version),
        format!("Solve time: {}ms", schedule.metadata.solve_time_ms),
        String::new(),
    ];

    lines.push("## Summary\n".to_string());
    lines.push("| Metric | Value |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| Total Shifts | {} |", validation.statistics.total_shifts));
    lines.push(format!("| Total Teachers | {} |", validation.statistics.total_teachers));
    lines.push(format!("| Total Students | {} |", validation.statistics.total_students));
    lines.push(format!("| Total Assignments | {} |", validation.statistics.total_assignments));
    lines.push(format!("| Total Shortage | {} |", validation.statistics.total_shortage));
    lines.push(format!(
        "| Students Fully Served | {} |",
        validation.statistics.students_fully_served
    ));
    lines.push(format!(
        "| Teachers With Shifts | {} |",
        validation.statistics.teachers_with_shifts
    ));
    lines.push(format!(
        "| Avg Shifts / Active Teacher | {:.1} |",
        validation.statistics.avg_shifts_per_active_teacher
    ));
    lines.push(format!("| Overall Score | {:.1}/100 |", validation.total_score));
    lines.push(String::new());

    if validation.is_valid {
        lines.push("## Validation: ✅ PASSED\n".to_string());
    } else {
        lines.push("## Validation: ❌ FAILED\n".to_string());
        for violation in &validation.hard_violations {
            lines.push(format!("- **{}**: {}", violation.constraint, violation.message));
        }
        lines.push(String::new());
    }

    lines.push("## Soft Constraint Scores\n".to_string());
    for score in &validation.soft_scores {
        let pct = if score.max_score > 0.0 { (score.score / score.max_score) * 100.0 } else { 100.0 };
        lines.push(format!("- **{}**: {:.1}% ({})", score.constraint, pct, score.details));
    }
    lines.push(String::new());

    lines.push("## Shifts by Subject\n".to_string());
    let rows = teacher_schedules(schedule, input);
    let subject_names: BTreeMap<&str, &str> =
        input.subjects.iter().map(|s| (s.id.0.as_str(), s.name.as_str())).collect();

    let mut by_subject: BTreeMap<&str, Vec<_>> = BTreeMap::new();
    for row in &rows {
        by_subject.entry(row.subject_id.as_str()).or_default().push(row);
    }

    for (subject_id, subject_rows) in by_subject {
        let subject_name = subject_names.get(subject_id).copied().unwrap_or(subject_id);
        lines.push(format!("### {}\n", subject_name));
        lines.push("| Teacher | Date | Period | Students |".to_string());
        lines.push("|---------|------|--------|----------|".to_string());
        for row in subject_rows {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                row.teacher_name,
                row.date,
                row.period_index,
                row.student_names.join(", ")
            ));
        }
        lines.push(String::new());
    }

    let shortages = shortage_table(schedule, input);
    if !shortages.is_empty() {
        lines.push("## Shortage\n".to_string());
        lines.push("| Student | Subject | Shortage |".to_string());
        lines.push("|---------|---------|----------|".to_string());
        for row in shortages {
            lines.push(format!("| {} | {} | {} |", row.student_name, row.subject_name, row.shortage_count));
        }
    }

    lines.join("\n")
}
