use crate::reporter::json::teacher_schedules;
use crate::types::{Schedule, ScheduleInput};
use crate::validator::ValidationReport;
use colored::Colorize;
use std::collections::BTreeMap;

/// Generate a plain text report (with colors for terminal)
pub fn generate_text_report(schedule: &Schedule, input: &ScheduleInput, validation: &ValidationReport) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("               SCHEDULE REPORT".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("Generated: {}", schedule.metadata.generated_at));
    lines.push(format!("Solve Time: {}ms", schedule.metadata.solve_time_ms));
    lines.push(String::new());

    lines.push("─".repeat(40));
    lines.push("STATISTICS".to_string());
    lines.push("─".repeat(40));
    lines.push(format!("  Shifts:        {}", validation.statistics.total_shifts));
    lines.push(format!("  Teachers:      {}", validation.statistics.total_teachers));
    lines.push(format!("  Students:      {}", validation.statistics.total_students));
    lines.push(format!("  Assignments:   {}", validation.statistics.total_assignments));
    lines.push(format!("  Shortage:      {}", validation.statistics.total_shortage));
    lines.push(format!(
        "  Fully Served:  {}/{}",
        validation.statistics.students_fully_served, validation.statistics.total_students
    ));
    lines.push(format!("  Score:         {:.1}/100", validation.total_score));
    lines.push(String::new());

    lines.push("─".repeat(40));
    if validation.is_valid {
        lines.push("VALIDATION: PASSED".green().to_string());
    } else {
        lines.push("VALIDATION: FAILED".red().to_string());
        for v in &validation.hard_violations {
            lines.push(format!("  ! {}: {}", v.constraint, v.message));
        }
    }
    lines.push("─".repeat(40));
    lines.push(String::new());

    lines.push("SOFT CONSTRAINT SCORES".to_string());
    lines.push("─".repeat(40));
    for score in &validation.soft_scores {
        let pct = if score.max_score > 0.0 { (score.score / score.max_score) * 100.0 } else { 100.0 };
        let indicator = if pct >= 90.0 { "●".green() } else if pct >= 60.0 { "●".yellow() } else { "●".red() };
        lines.push(format!("  {} {:<28} {:>5.1}%  ({})", indicator, score.constraint, pct, score.details));
    }
    lines.push(String::new());

    let subject_names: BTreeMap<&str, &str> =
        input.subjects.iter().map(|s| (s.id.0.as_str(), s.name.as_str())).collect();
    let rows = teacher_schedules(schedule, input);
    let mut by_subject: BTreeMap<&str, Vec<_>> = BTreeMap::new();
    for row in &rows {
        by_subject.entry(row.subject_id.as_str()).or_default().push(row);
    }

    lines.push("SHIFTS BY SUBJECT".to_string());
    lines.push("─".repeat(40));
    for (subject_id, subject_rows) in &by_subject {
        let name = subject_names.get(subject_id).copied().unwrap_or(subject_id);
        lines.push(format!("\n{} ({} shifts)", name.bold(), subject_rows.len()));

        for row in subject_rows {
            let fill_indicator = if row.student_names.len() == 2 {
                "●".green()
            } else {
                "●".yellow()
            };
            lines.push(format!(
                "  {} {} P{} | {} | {}",
                fill_indicator,
                row.date,
                row.period_index,
                row.teacher_name,
                row.student_names.join(", ")
            ));
        }
    }

    if !schedule.shortage.is_empty() {
        lines.push(String::new());
        lines.push("SHORTAGE".to_string());
        lines.push("─".repeat(40));
        for entry in &schedule.shortage {
            lines.push(format!(
                "  {} {} / {} | shortage {}",
                "●".red(),
                entry.student_id,
                entry.subject_id,
                entry.shortage_count
            ));
        }
    }

    lines.push(String::new());
    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick summary to stdout
pub fn print_summary(schedule: &Schedule, validation: &ValidationReport) {
    println!();
    if validation.is_valid {
        println!("{}", "✓ Schedule generated successfully".green().bold());
    } else {
        println!("{}", "✗ Schedule has validation errors".red().bold());
    }
    println!();
    println!("  Shifts:      {}", validation.statistics.total_shifts);
    println!("  Assignments: {}", validation.statistics.total_assignments);
    println!("  Shortage:    {}", validation.statistics.total_shortage);
    println!("  Score:       {:.1}/100", validation.total_score);
    println!("  Time:        {}ms", schedule.metadata.solve_time_ms);
    println!();
}
